use std::ops::RangeInclusive;

use crate::foundation::core::{Vec3, clamp_finite};
use crate::scene::model::{
    Animation, CameraSpec, Color, Keyframe, ObjectKind, ObjectSpec, PrimitiveKind, RenderSettings,
    ScenePlan, Transform,
};

/// Allowed `duration_seconds`.
pub const DURATION_SECONDS: RangeInclusive<f64> = 0.5..=5.0;
/// Allowed `fps`.
pub const FPS: RangeInclusive<u32> = 12..=60;
/// Allowed `resolution_x`.
pub const RESOLUTION_X: RangeInclusive<u32> = 320..=1920;
/// Allowed `resolution_y`.
pub const RESOLUTION_Y: RangeInclusive<u32> = 180..=1080;
/// Allowed per-axis location.
pub const LOCATION: RangeInclusive<f64> = -100.0..=100.0;
/// Allowed per-axis rotation in degrees.
pub const ROTATION_DEGREES: RangeInclusive<f64> = -360.0..=360.0;
/// Allowed per-axis scale.
pub const SCALE: RangeInclusive<f64> = 0.05..=50.0;
/// Allowed per-axis object dimension.
pub const DIMENSION: RangeInclusive<f64> = 0.05..=50.0;

/// Planes whose height is closer than this to zero are snapped onto the ground.
pub const PLANE_SNAP_EPSILON: f64 = 0.01;

/// Name of the object inserted when nothing renderable is left.
pub const DEFAULT_OBJECT_NAME: &str = "DefaultCube";

/// Clamp and repair a plan so every renderer can draw it quickly and safely.
///
/// Total and idempotent: out-of-range numbers are clamped, missing vector components are
/// zero-filled, unsupported object types are dropped, planes are leveled, and an empty result
/// gets a placeholder cube. Object order is preserved.
#[tracing::instrument(skip(plan), fields(objects_in = plan.objects.len()))]
pub fn normalize(mut plan: ScenePlan) -> ScenePlan {
    plan.render = normalize_render(plan.render);
    plan.camera = normalize_camera(plan.camera);

    let before = plan.objects.len();
    plan.objects = plan
        .objects
        .into_iter()
        .filter_map(normalize_object)
        .collect();
    let dropped = before - plan.objects.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped objects with unsupported types");
    }

    if plan.objects.is_empty() {
        tracing::debug!("no renderable objects left; inserting placeholder cube");
        plan.objects.push(default_object());
    }

    plan
}

/// The placeholder object used when a plan would otherwise be empty.
pub fn default_object() -> ObjectSpec {
    ObjectSpec::new(DEFAULT_OBJECT_NAME, PrimitiveKind::Cube)
        .with_color(Color::new(0.6, 0.7, 0.9))
        .with_dimensions([1.0, 1.0, 1.0])
        .with_transform(Transform::at(Vec3::new(0.0, 0.0, 0.5)))
}

fn normalize_render(r: RenderSettings) -> RenderSettings {
    RenderSettings {
        duration_seconds: clamp_range(r.duration_seconds, &DURATION_SECONDS),
        fps: r.fps.clamp(*FPS.start(), *FPS.end()),
        resolution_x: r.resolution_x.clamp(*RESOLUTION_X.start(), *RESOLUTION_X.end()),
        resolution_y: r.resolution_y.clamp(*RESOLUTION_Y.start(), *RESOLUTION_Y.end()),
        // Colors clamp themselves; rebuilding covers values assigned directly to the fields.
        background_color: reclamp(r.background_color),
    }
}

fn normalize_camera(mut cam: CameraSpec) -> CameraSpec {
    cam.transform = normalize_transform(cam.transform);
    cam.look_at = cam.look_at.map(|v| clamp_vec(v, &LOCATION));
    cam.animation = cam.animation.map(normalize_animation);
    if !cam.focal_length_mm.is_finite() || cam.focal_length_mm <= 0.0 {
        cam.focal_length_mm = 35.0;
    }
    cam
}

fn normalize_object(mut o: ObjectSpec) -> Option<ObjectSpec> {
    let Some(kind) = o.kind.primitive() else {
        tracing::debug!(name = %o.name, kind = ?o.kind, "unsupported primitive type");
        return None;
    };
    o.kind = ObjectKind::Primitive(kind);
    o.color = reclamp(o.color);
    o.transform = normalize_transform(o.transform);
    o.dimensions = clamp_dims(&o.dimensions);
    o.animation = o.animation.map(normalize_animation);

    if kind == PrimitiveKind::Plane {
        // Planes serve as ground or water: always level, and snapped onto z = 0 when close.
        o.transform.rotation_degrees = Vec3::ZERO;
        if o.transform.location.z.abs() < PLANE_SNAP_EPSILON {
            o.transform.location.z = 0.0;
        }
    }

    Some(o)
}

fn normalize_transform(t: Transform) -> Transform {
    Transform {
        location: clamp_vec(t.location, &LOCATION),
        rotation_degrees: clamp_vec(t.rotation_degrees, &ROTATION_DEGREES),
        scale: clamp_vec(t.scale, &SCALE),
    }
}

fn normalize_animation(a: Animation) -> Animation {
    let keys = |ks: Vec<Keyframe>| ks.into_iter().map(normalize_keyframe).collect();
    Animation {
        location_keys: keys(a.location_keys),
        rotation_keys: keys(a.rotation_keys),
        scale_keys: keys(a.scale_keys),
    }
}

fn normalize_keyframe(k: Keyframe) -> Keyframe {
    Keyframe {
        time: clamp_finite(k.time, 0.0, f64::MAX),
        location: k.location.map(|v| clamp_vec(v, &LOCATION)),
        rotation_degrees: k.rotation_degrees.map(|v| clamp_vec(v, &ROTATION_DEGREES)),
        scale: k.scale.map(|v| clamp_vec(v, &SCALE)),
    }
}

fn clamp_dims(dims: &[f64]) -> Vec<f64> {
    Vec3::from_slice(dims)
        .clamped(*DIMENSION.start(), *DIMENSION.end())
        .to_array()
        .to_vec()
}

fn clamp_vec(v: Vec3, range: &RangeInclusive<f64>) -> Vec3 {
    v.clamped(*range.start(), *range.end())
}

fn clamp_range(v: f64, range: &RangeInclusive<f64>) -> f64 {
    clamp_finite(v, *range.start(), *range.end())
}

fn reclamp(c: Color) -> Color {
    Color::new(c.r, c.g, c.b)
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/pass.rs"]
mod tests;
