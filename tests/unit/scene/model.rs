use super::*;

#[test]
fn color_clamps_on_construction_and_parse() {
    let c = Color::new(1.5, -0.2, f64::NAN);
    assert_eq!(c.to_array(), [1.0, 0.0, 0.0]);

    let c: Color = serde_json::from_str(r#"{"r": 2.0, "b": 0.25}"#).unwrap();
    assert_eq!(c.to_array(), [1.0, 0.8, 0.25]);

    let c: Color = serde_json::from_str("[0.1, 0.2, 3]").unwrap();
    assert_eq!(c.to_array(), [0.1, 0.2, 1.0]);
}

#[test]
fn object_defaults_fill_missing_fields() {
    let o: ObjectSpec = serde_json::from_str(r#"{"name": "a", "type": "cube"}"#).unwrap();
    assert_eq!(o.kind, ObjectKind::Primitive(PrimitiveKind::Cube));
    assert_eq!(o.color, Color::default());
    assert_eq!(o.dimensions, vec![1.0, 1.0, 1.0]);
    assert_eq!(o.transform, Transform::default());
    assert!(o.animation.is_none());
}

#[test]
fn unknown_types_survive_parsing() {
    let o: ObjectSpec = serde_json::from_str(r#"{"name": "t", "type": "teapot"}"#).unwrap();
    assert_eq!(o.kind, ObjectKind::Unsupported("teapot".to_string()));
    assert_eq!(o.kind.primitive(), None);

    let back = serde_json::to_value(&o).unwrap();
    assert_eq!(back["type"], "teapot");
}

#[test]
fn primitive_names_resolve_case_insensitively() {
    assert_eq!(
        ObjectKind::Unsupported(" Torus ".to_string()).primitive(),
        Some(PrimitiveKind::Torus)
    );
    assert_eq!("CONE".parse::<PrimitiveKind>(), Ok(PrimitiveKind::Cone));
    assert!("pyramid".parse::<PrimitiveKind>().is_err());
    assert_eq!(ObjectKind::from("sphere"), PrimitiveKind::Sphere.into());
    assert_eq!(
        ObjectKind::from("Sphere"),
        ObjectKind::Unsupported("Sphere".to_string())
    );
}

#[test]
fn render_settings_accept_sloppy_numbers() {
    let r: RenderSettings =
        serde_json::from_str(r#"{"fps": 30.0, "resolution_x": -5, "duration_seconds": 2}"#)
            .unwrap();
    assert_eq!(r.fps, 30);
    assert_eq!(r.resolution_x, 0);
    assert_eq!(r.resolution_y, 720);
    assert_eq!(r.duration_seconds, 2.0);
}

#[test]
fn frame_count_and_keyframe_frames_round() {
    let r = RenderSettings {
        duration_seconds: 2.5,
        fps: 24,
        ..RenderSettings::default()
    };
    assert_eq!(r.frame_count(), 60);

    let r = RenderSettings {
        duration_seconds: 0.0,
        ..RenderSettings::default()
    };
    assert_eq!(r.frame_count(), 1);

    let k = Keyframe {
        time: 1.02,
        location: None,
        rotation_degrees: None,
        scale: None,
    };
    assert_eq!(k.frame(24), 24);
}

#[test]
fn plan_defaults_match_document_conventions() {
    let p: ScenePlan = serde_json::from_str("{}").unwrap();
    assert_eq!(p.version, "1.0");
    assert_eq!(p.camera.name, "Camera");
    assert_eq!(p.camera.focal_length_mm, 35.0);
    assert_eq!(p.render.fps, 24);
    assert_eq!(p.render.background_color, Color::new(0.05, 0.08, 0.12));
    assert!(p.objects.is_empty());
}

#[test]
fn optional_fields_serialize_as_null() {
    let v = serde_json::to_value(ScenePlan::default()).unwrap();
    assert!(v["description"].is_null());
    assert!(v["camera"]["look_at"].is_null());
    assert!(v["camera"]["animation"].is_null());
}
