use super::*;

fn unit_cube_at(x: f64) -> Aabb {
    Aabb::new(DVec3::new(x - 0.5, -0.5, -0.5), DVec3::new(x + 0.5, 0.5, 0.5))
}

#[test]
fn empty_scene_frames_the_origin() {
    let f = frame(&[]);
    assert_eq!(f.target, DVec3::ZERO);
    assert_eq!(f.distance, 5.0);
    assert!((f.eye.length() - 5.0).abs() < 1e-12);
    assert_eq!(f.yfov_deg, 45.0);
}

#[test]
fn two_cubes_scenario() {
    let boxes = [unit_cube_at(-2.0), unit_cube_at(2.0)];
    let all = Aabb::union_all(boxes).unwrap();
    assert_eq!(all.min, DVec3::new(-2.5, -0.5, -0.5));
    assert_eq!(all.max, DVec3::new(2.5, 0.5, 0.5));

    let f = frame(&boxes);
    let size = 27f64.sqrt();
    assert!((size - 5.196).abs() < 1e-3);
    assert!((f.distance - 1.8 * size).abs() < 1e-12);
    assert!((f.distance - 9.353).abs() < 1e-3);
    assert_eq!(f.target, DVec3::ZERO);

    let dir = (f.eye - f.target).normalize();
    assert!((dir - DVec3::new(1.2, 1.2, 0.8).normalize()).length() < 1e-12);
}

#[test]
fn tiny_scenes_keep_the_minimum_distance() {
    let b = Aabb::new(DVec3::splat(-0.01), DVec3::splat(0.01));
    assert_eq!(frame(&[b]).distance, MIN_DISTANCE);
}

#[test]
fn pose_is_an_orthonormal_look_at_basis() {
    let f = frame(&[unit_cube_at(3.0)]);
    let right = f.pose.x_axis.truncate();
    let up = f.pose.y_axis.truncate();
    let back = f.pose.z_axis.truncate();
    for v in [right, up, back] {
        assert!((v.length() - 1.0).abs() < 1e-12);
    }
    assert!(right.dot(up).abs() < 1e-12);
    assert!(right.dot(back).abs() < 1e-12);
    assert!(right.z.abs() < 1e-12, "right stays horizontal");
    assert!(up.z > 0.0);
    assert_eq!(f.pose.w_axis.truncate(), f.eye);
    assert!((f.forward() - (f.target - f.eye).normalize()).length() < 1e-12);
    // The target projects onto the optical axis.
    let local = f.pose.inverse().transform_point3(f.target);
    assert!(local.x.abs() < 1e-9 && local.y.abs() < 1e-9 && local.z < 0.0);
}

#[test]
fn straight_down_view_still_has_a_basis() {
    let m = look_at(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO);
    let right = m.x_axis.truncate();
    assert!((right.length() - 1.0).abs() < 1e-12);
    assert!(m.is_finite());
}

#[test]
fn framing_is_deterministic() {
    let boxes = [unit_cube_at(-1.0), unit_cube_at(4.0)];
    assert_eq!(frame(&boxes), frame(&boxes));
}
