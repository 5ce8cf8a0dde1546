use super::*;
use crate::foundation::core::{DVec3, Vec3};
use crate::scene::model::{ObjectSpec, Transform};

fn cube(name: &str, x: f64) -> ObjectSpec {
    ObjectSpec::new(name, PrimitiveKind::Cube).with_transform(Transform::at(Vec3::new(x, 0.0, 0.0)))
}

#[test]
fn bounds_are_taken_after_posing() {
    let plan = ScenePlan::with_objects(vec![cube("left", -2.0), cube("right", 2.0)]);
    let g = compile_scene(&plan).unwrap();
    assert_eq!(g.objects.len(), 2);
    assert_eq!(g.objects[0].world_bounds.min, DVec3::new(-2.5, -0.5, -0.5));
    assert_eq!(g.objects[1].world_bounds.max, DVec3::new(2.5, 0.5, 0.5));
    assert!((g.camera.distance - 1.8 * 27f64.sqrt()).abs() < 1e-9);
    assert_eq!(g.resolution, (1280, 720));
    assert_eq!(g.triangle_count(), 24);
}

#[test]
fn rotated_objects_grow_their_world_bounds() {
    let mut slab = ObjectSpec::new("slab", PrimitiveKind::Cube).with_dimensions([2.0, 0.2, 0.2]);
    slab.transform.rotation_degrees = Vec3::new(0.0, 0.0, 90.0);
    let g = compile_scene(&ScenePlan::with_objects(vec![slab])).unwrap();
    let size = g.objects[0].world_bounds.size();
    assert!((size - DVec3::new(0.2, 2.0, 0.2)).length() < 1e-9);
}

#[test]
fn unsupported_objects_are_skipped() {
    let plan = ScenePlan::with_objects(vec![ObjectSpec::new("pot", "teapot"), cube("c", 0.0)]);
    let g = compile_scene(&plan).unwrap();
    let names: Vec<_> = g.objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["c"]);
}

#[test]
fn explicit_look_at_uses_the_camera_location() {
    let mut plan = ScenePlan::with_objects(vec![cube("c", 0.0)]);
    plan.camera.transform.location = Vec3::new(0.0, -10.0, 2.0);
    plan.camera.look_at = Some(Vec3::new(0.0, 0.0, 0.5));
    let g = compile_scene(&plan).unwrap();
    assert_eq!(g.camera.eye, DVec3::new(0.0, -10.0, 2.0));
    assert_eq!(g.camera.target, DVec3::new(0.0, 0.0, 0.5));
    assert_eq!(g.camera.yfov_deg, 45.0);
}

#[test]
fn malformed_dimensions_name_the_object() {
    let bad = ObjectSpec::new("stub", PrimitiveKind::Cylinder).with_dimensions([1.0]);
    let err = compile_scene(&ScenePlan::with_objects(vec![bad])).unwrap_err();
    assert!(matches!(err, PrimkitError::Validation(_)));
    assert!(err.to_string().contains("'stub'"));
}

#[test]
fn empty_plan_frames_the_origin() {
    let g = compile_scene(&ScenePlan::default()).unwrap();
    assert!(g.objects.is_empty());
    assert!(g.bounds().is_none());
    assert_eq!(g.camera.distance, 5.0);
}
