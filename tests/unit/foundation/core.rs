use super::*;

#[test]
fn short_arrays_are_zero_filled() {
    let v: Vec3 = serde_json::from_str("[1.5]").unwrap();
    assert_eq!(v, Vec3::new(1.5, 0.0, 0.0));

    let v: Vec3 = serde_json::from_str("[]").unwrap();
    assert_eq!(v, Vec3::ZERO);
}

#[test]
fn extra_components_are_ignored_and_objects_accepted() {
    let v: Vec3 = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));

    let v: Vec3 = serde_json::from_str(r#"{"x": 1, "z": -2}"#).unwrap();
    assert_eq!(v, Vec3::new(1.0, 0.0, -2.0));
}

#[test]
fn serializes_as_array() {
    let s = serde_json::to_string(&Vec3::new(1.0, -0.5, 2.0)).unwrap();
    assert_eq!(s, "[1.0,-0.5,2.0]");
}

#[test]
fn clamp_finite_maps_non_finite_to_zero_before_clamping() {
    assert_eq!(clamp_finite(f64::NAN, -1.0, 1.0), 0.0);
    assert_eq!(clamp_finite(f64::INFINITY, 0.05, 50.0), 0.05);
    assert_eq!(clamp_finite(120.0, -100.0, 100.0), 100.0);
}

#[test]
fn lenient_u32_accepts_floats_and_negatives() {
    #[derive(serde::Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "de_lenient_u32")]
        v: u32,
    }

    let p: Probe = serde_json::from_str(r#"{"v": 23.9}"#).unwrap();
    assert_eq!(p.v, 23);
    let p: Probe = serde_json::from_str(r#"{"v": -4}"#).unwrap();
    assert_eq!(p.v, 0);
    let p: Probe = serde_json::from_str(r#"{"v": 1e12}"#).unwrap();
    assert_eq!(p.v, u32::MAX);
}
