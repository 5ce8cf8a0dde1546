use super::*;
use crate::geometry::scene::compile_scene;
use crate::normalize::pass::normalize;
use crate::scene::model::{ObjectSpec, PrimitiveKind, ScenePlan};

fn small_plan(objects: Vec<ObjectSpec>) -> ScenePlan {
    let mut plan = ScenePlan::with_objects(objects);
    plan.render.resolution_x = 320;
    plan.render.resolution_y = 180;
    normalize(plan)
}

fn render(plan: &ScenePlan, downscale: u32) -> FrameRGBA {
    let scene = compile_scene(plan).unwrap();
    CpuPreviewBackend::new(PreviewSettings { downscale })
        .render(&scene)
        .unwrap()
}

#[test]
fn empty_scene_is_background_only() {
    let mut plan = ScenePlan::default();
    plan.render.resolution_x = 32;
    plan.render.resolution_y = 16;
    let frame = render(&plan, 1);
    let bg = plan.render.background_color.to_rgb8();
    assert!(frame.data.chunks(4).all(|p| p == [bg[0], bg[1], bg[2], 255]));
}

#[test]
fn framed_object_covers_the_center() {
    let red = ObjectSpec::new("red", PrimitiveKind::Sphere).with_color(Color::new(1.0, 0.0, 0.0));
    let frame = render(&small_plan(vec![red]), 1);
    let [r, g, b, a] = frame.pixel(160, 90).unwrap();
    assert!(r > 0 && g == 0 && b == 0 && a == 255);
    let bg = frame.pixel(0, 0).unwrap();
    assert_ne!(bg, [r, g, b, a]);
}

#[test]
fn nearer_objects_win_the_depth_test() {
    let mut far = ObjectSpec::new("far", PrimitiveKind::Cube)
        .with_color(Color::new(0.0, 0.0, 1.0))
        .with_dimensions([3.0, 3.0, 3.0]);
    far.transform.location.x = -3.0;
    let mut near = ObjectSpec::new("near", PrimitiveKind::Cube)
        .with_color(Color::new(0.0, 1.0, 0.0))
        .with_dimensions([0.5, 0.5, 0.5]);
    near.transform.location.x = 3.0;

    let mut plan = small_plan(vec![near, far]);
    plan.camera.transform.location.x = 10.0;
    plan.camera.look_at = Some(crate::foundation::core::Vec3::new(-3.0, 0.0, 0.0));
    let frame = render(&plan, 1);
    let [r, g, b, _] = frame.pixel(160, 90).unwrap();
    assert!(g > 0 && r == 0 && b == 0, "expected the near green cube, got {r},{g},{b}");
}

#[test]
fn downscale_divides_the_resolution() {
    let frame = render(&small_plan(vec![]), 4);
    assert_eq!((frame.width, frame.height), (80, 45));
    assert_eq!(frame.data.len(), 80 * 45 * 4);
}

#[test]
fn rendering_is_deterministic() {
    let plan = small_plan(vec![
        ObjectSpec::new("ring", PrimitiveKind::Torus).with_dimensions([2.0, 2.0, 0.6]),
        ObjectSpec::new("cone", PrimitiveKind::Cone),
    ]);
    assert_eq!(render(&plan, 2), render(&plan, 2));
}
