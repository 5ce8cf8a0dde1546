use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Vec3, clamp_finite, de_lenient_u32};

/// Linear RGB color with every channel in `[0, 1]`.
///
/// Channels are clamped on construction, including deserialization; non-finite values become 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Neutral gray used when a part carries no color.
    pub const NEUTRAL_GRAY: Self = Self {
        r: 0.7,
        g: 0.7,
        b: 0.7,
    };

    /// Build a color, clamping each channel into `[0, 1]`.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_finite(r, 0.0, 1.0),
            g: clamp_finite(g, 0.0, 1.0),
            b: clamp_finite(b, 0.0, 1.0),
        }
    }

    /// Channels as an array.
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Quantize to 8-bit sRGB-agnostic channel values (plain scaling, no gamma).
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.8, 0.8, 0.8)
    }
}

fn default_channel() -> f64 {
    0.8
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr(Vec<f64>),
            Obj {
                #[serde(default = "default_channel")]
                r: f64,
                #[serde(default = "default_channel")]
                g: f64,
                #[serde(default = "default_channel")]
                b: f64,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr(vals) => {
                let at = |i: usize| vals.get(i).copied().unwrap_or_else(default_channel);
                Ok(Self::new(at(0), at(1), at(2)))
            }
            Repr::Obj { r, g, b } => Ok(Self::new(r, g, b)),
        }
    }
}

/// Location, rotation and scale of an object or camera.
///
/// Rotation is in degrees, applied about the fixed world axes X, then Y, then Z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation in scene units.
    #[serde(default)]
    pub location: Vec3,
    /// Extrinsic X→Y→Z Euler angles in degrees.
    #[serde(default)]
    pub rotation_degrees: Vec3,
    /// Per-axis scale; not applied to object geometry (dimensions already encode size).
    #[serde(default = "default_scale")]
    pub scale: Vec3,
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation_degrees: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Transform with only a location set.
    pub fn at(location: Vec3) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }
}

/// One animation key; only the channels that are set take part in that key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Key time in seconds, `>= 0` after normalization.
    pub time: f64,
    /// Location at this key.
    #[serde(default)]
    pub location: Option<Vec3>,
    /// Rotation at this key, degrees.
    #[serde(default)]
    pub rotation_degrees: Option<Vec3>,
    /// Scale at this key.
    #[serde(default)]
    pub scale: Option<Vec3>,
}

impl Keyframe {
    /// Frame number this key lands on for a given frame rate (`round(time * fps)`).
    pub fn frame(&self, fps: u32) -> u32 {
        let f = (self.time.max(0.0) * f64::from(fps)).round();
        f as u32
    }
}

/// Independently timed key sequences per channel.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Location keys.
    #[serde(default)]
    pub location_keys: Vec<Keyframe>,
    /// Rotation keys.
    #[serde(default)]
    pub rotation_keys: Vec<Keyframe>,
    /// Scale keys.
    #[serde(default)]
    pub scale_keys: Vec<Keyframe>,
}

impl Animation {
    /// `true` when no channel has keys.
    pub fn is_empty(&self) -> bool {
        self.location_keys.is_empty() && self.rotation_keys.is_empty() && self.scale_keys.is_empty()
    }
}

/// The closed set of primitives every renderer supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// Axis-aligned box.
    Cube,
    /// Sphere or ellipsoid.
    Sphere,
    /// Capped cylinder along local +Z.
    Cylinder,
    /// Capped cone along local +Z, apex up.
    Cone,
    /// Thin box lying in the local XY plane.
    Plane,
    /// Ring surface around local Z.
    Torus,
}

impl PrimitiveKind {
    /// All supported kinds in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Cube,
        Self::Sphere,
        Self::Cylinder,
        Self::Cone,
        Self::Plane,
        Self::Torus,
    ];

    /// Lowercase document name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Plane => "plane",
            Self::Torus => "torus",
        }
    }

    /// Human-facing name used in component listings.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Cube => "Box",
            Self::Sphere => "Sphere",
            Self::Cylinder => "Cylinder",
            Self::Cone => "Cone",
            Self::Plane => "Plane",
            Self::Torus => "Torus",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveKind {
    type Err = ();

    /// Case-insensitive, whitespace-trimmed match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Object `type` field: either a supported primitive or an untrusted unknown string.
///
/// Unknown strings survive parsing and serialization so that normalization, not parsing, is
/// where they get dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectKind {
    /// One of the supported primitives.
    Primitive(PrimitiveKind),
    /// Anything else.
    Unsupported(String),
}

impl ObjectKind {
    /// The primitive kind, resolving unknown strings case-insensitively.
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(k) => Some(*k),
            Self::Unsupported(s) => s.parse().ok(),
        }
    }
}

impl From<PrimitiveKind> for ObjectKind {
    fn from(k: PrimitiveKind) -> Self {
        Self::Primitive(k)
    }
}

impl From<&str> for ObjectKind {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(k) if PrimitiveKind::as_str(k) == s => Self::Primitive(k),
            _ => Self::Unsupported(s.to_string()),
        }
    }
}

/// One primitive object in a scene plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    /// Object name; insertion order and names drive deterministic output.
    pub name: String,
    /// Primitive type.
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Surface color.
    #[serde(default)]
    pub color: Color,
    /// Overall extents in local axes; interpretation depends on the primitive.
    #[serde(default = "default_dimensions")]
    pub dimensions: Vec<f64>,
    /// Object pose.
    #[serde(default)]
    pub transform: Transform,
    /// Optional keyframes.
    #[serde(default)]
    pub animation: Option<Animation>,
}

fn default_dimensions() -> Vec<f64> {
    vec![1.0, 1.0, 1.0]
}

impl ObjectSpec {
    /// Build an object with default color, unit dimensions and identity transform.
    pub fn new(name: impl Into<String>, kind: impl Into<ObjectKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            color: Color::default(),
            dimensions: default_dimensions(),
            transform: Transform::default(),
            animation: None,
        }
    }

    /// Replace the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Replace the dimensions.
    pub fn with_dimensions(mut self, dimensions: impl Into<Vec<f64>>) -> Self {
        self.dimensions = dimensions.into();
        self
    }

    /// Replace the transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Scene camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSpec {
    /// Camera name.
    #[serde(default = "default_camera_name")]
    pub name: String,
    /// Camera pose; `location` is the eye when `look_at` is set.
    #[serde(default)]
    pub transform: Transform,
    /// Explicit aim point; when absent renderers auto-frame the scene.
    #[serde(default)]
    pub look_at: Option<Vec3>,
    /// Optional keyframes.
    #[serde(default)]
    pub animation: Option<Animation>,
    /// Lens focal length in millimetres.
    #[serde(default = "default_focal_length_mm")]
    pub focal_length_mm: f64,
}

fn default_camera_name() -> String {
    "Camera".to_string()
}

fn default_focal_length_mm() -> f64 {
    35.0
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            name: default_camera_name(),
            transform: Transform::default(),
            look_at: None,
            animation: None,
            focal_length_mm: default_focal_length_mm(),
        }
    }
}

/// Output settings shared by every renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Clip duration in seconds.
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: f64,
    /// Frames per second.
    #[serde(default = "default_fps", deserialize_with = "de_lenient_u32")]
    pub fps: u32,
    /// Output width in pixels.
    #[serde(default = "default_resolution_x", deserialize_with = "de_lenient_u32")]
    pub resolution_x: u32,
    /// Output height in pixels.
    #[serde(default = "default_resolution_y", deserialize_with = "de_lenient_u32")]
    pub resolution_y: u32,
    /// Clear color.
    #[serde(default = "default_background_color")]
    pub background_color: Color,
}

fn default_duration_seconds() -> f64 {
    5.0
}

fn default_fps() -> u32 {
    24
}

fn default_resolution_x() -> u32 {
    1280
}

fn default_resolution_y() -> u32 {
    720
}

fn default_background_color() -> Color {
    Color::new(0.05, 0.08, 0.12)
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            duration_seconds: default_duration_seconds(),
            fps: default_fps(),
            resolution_x: default_resolution_x(),
            resolution_y: default_resolution_y(),
            background_color: default_background_color(),
        }
    }
}

impl RenderSettings {
    /// Number of frames an animated render produces, at least one.
    pub fn frame_count(&self) -> u32 {
        let frames = (self.duration_seconds.max(0.0) * f64::from(self.fps)).round();
        (frames as u32).max(1)
    }
}

/// The canonical document exchanged between planner, normalizer and renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenePlan {
    /// Document format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Free-form description of what the plan depicts.
    #[serde(default)]
    pub description: Option<String>,
    /// Render settings.
    #[serde(default)]
    pub render: RenderSettings,
    /// Camera.
    #[serde(default)]
    pub camera: CameraSpec,
    /// Objects in rendering order.
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for ScenePlan {
    fn default() -> Self {
        Self {
            version: default_version(),
            description: None,
            render: RenderSettings::default(),
            camera: CameraSpec::default(),
            objects: Vec::new(),
        }
    }
}

impl ScenePlan {
    /// Empty plan with default settings and the given objects.
    pub fn with_objects(objects: Vec<ObjectSpec>) -> Self {
        Self {
            objects,
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
