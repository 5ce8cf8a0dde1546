//! primkit turns loosely structured scene descriptions into a small, bounded set of geometric
//! primitives that independent renderers can agree on.
//!
//! The crate centers on the scene plan document and the geometry contract every renderer must
//! share. Language understanding is delegated to external collaborators behind the
//! [`ObjectExtractor`] and [`PartSynthesizer`] traits.
//!
//! # Pipeline overview
//!
//! 1. **Synthesize**: extracted objects are decomposed into primitive parts ([`KitbashDocument`])
//! 2. **Flatten**: parts become plan objects ([`flatten_into_plan`])
//! 3. **Normalize**: every value is clamped into renderable ranges ([`normalize`])
//! 4. **Compile**: primitives become meshes, poses and a framed camera ([`compile_scene`])
//! 5. **Render** (optional): a flat-shaded CPU preview ([`CpuPreviewBackend`])
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Permissive with data, strict with structure**: out-of-range numbers are clamped and
//!   unknown primitive types dropped; malformed documents are errors.
//! - **Deterministic**: normalization, mesh building, pose composition and framing produce
//!   bit-identical output for identical input ([`fingerprint_scene`] makes that checkable).
//! - **No global state**: planning knobs travel in an explicit [`PlannerConfig`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod geometry;
mod kitbash;
mod normalize;
mod render;
mod scene;
mod schema;

pub use foundation::core::{DMat4, DVec3, DVec4, Vec3, clamp_finite};
pub use foundation::error::{PrimkitError, PrimkitResult};

pub use scene::document::{
    from_str_lenient, is_kitbash_document, load_plan_lenient, parse_json_lenient, read_text,
    strip_json_comments, write_text,
};
pub use scene::model::{
    Animation, CameraSpec, Color, Keyframe, ObjectKind, ObjectSpec, PrimitiveKind,
    RenderSettings, ScenePlan, Transform,
};

pub use normalize::pass::{
    DEFAULT_OBJECT_NAME, DIMENSION, DURATION_SECONDS, FPS, LOCATION, PLANE_SNAP_EPSILON,
    RESOLUTION_X, RESOLUTION_Y, ROTATION_DEGREES, SCALE, default_object, normalize,
};

pub use geometry::fingerprint::{GeometryFingerprint, fingerprint_mesh, fingerprint_scene};
pub use geometry::framing::{Framing, YFOV_DEG, frame, look_at};
pub use geometry::mesh::{Aabb, LocalMesh};
pub use geometry::primitive::{
    MIN_PLANE_THICKNESS, Primitive, RADIAL_SEGMENTS, SPHERE_SUBDIVISIONS, TORUS_MAJOR_SEGMENTS,
    TORUS_MINOR_SEGMENTS, build,
};
pub use geometry::scene::{ObjectGeometry, SceneGeometry, compile_scene};
pub use geometry::transform::{compose, rotation_xyz};

pub use kitbash::flatten::{flatten_into_plan, flatten_objects};
pub use kitbash::model::{KitbashDocument, KitbashMeta, KitbashObject, KitbashPart};
pub use kitbash::planner::{
    Component, DEFAULT_REALITY_FACTOR, ExtractedObject, FixedExtractor, MAX_REALITY_FACTOR,
    ObjectExtractor, ObjectSketch, PartBudget, PartSynthesizer, PlannerConfig, PromptPlan,
    StageTimings, clean_part_name, combine_sketches, dedupe_objects, display_primitive_name,
    plan_object, plan_prompt, sketch_file_stem,
};
pub use kitbash::presets::{PresetSynthesizer, preset_parts};

pub use schema::kitbash::{extraction_schema, kitbash_schema};
pub use schema::strict::harden_schema;

pub use render::backend::{BackendKind, FrameRGBA, PreviewSettings, RenderBackend, create_backend};
pub use render::cpu::CpuPreviewBackend;
