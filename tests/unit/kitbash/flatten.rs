use super::*;
use crate::scene::model::{ObjectKind, PrimitiveKind, RenderSettings};

fn lamp() -> KitbashObject {
    KitbashObject {
        name: "Lamp".into(),
        parts: vec![
            KitbashPart::new("Base", PrimitiveKind::Cylinder)
                .sized([0.5, 0.5, 0.1])
                .at(0.0, 0.0, 0.05),
            KitbashPart::new("Shade", PrimitiveKind::Cone)
                .sized([0.4, 0.4, 0.5])
                .at(0.0, 0.0, 1.2)
                .rotated(0.0, 0.0, 45.0)
                .colored(1.0, 0.9, 0.6),
        ],
    }
}

#[test]
fn parts_become_prefixed_objects() {
    let objs = flatten_objects(&[lamp()]);
    let names: Vec<_> = objs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["Lamp_Base", "Lamp_Shade"]);

    let shade = &objs[1];
    assert_eq!(shade.kind, ObjectKind::Primitive(PrimitiveKind::Cone));
    assert_eq!(shade.transform.location, Vec3::new(0.0, 0.0, 1.2));
    assert_eq!(shade.transform.rotation_degrees, Vec3::new(0.0, 0.0, 45.0));
    assert_eq!(shade.transform.scale, Vec3::ONE);
    assert_eq!(shade.color, Color::new(1.0, 0.9, 0.6));
    assert!(shade.animation.is_none());
}

#[test]
fn missing_color_is_neutral_gray() {
    let objs = flatten_objects(&[lamp()]);
    assert_eq!(objs[0].color, Color::NEUTRAL_GRAY);
}

#[test]
fn unnamed_objects_and_parts_get_fallback_names() {
    let obj = KitbashObject {
        name: "  ".into(),
        parts: vec![KitbashPart::new("", PrimitiveKind::Sphere)],
    };
    let objs = flatten_objects(&[obj]);
    assert_eq!(objs[0].name, "object_part");
}

#[test]
fn objects_without_parts_contribute_nothing() {
    let empty = KitbashObject {
        name: "Ghost".into(),
        parts: Vec::new(),
    };
    let objs = flatten_objects(&[empty, lamp()]);
    assert_eq!(objs.len(), 2);
    assert!(objs.iter().all(|o| o.name.starts_with("Lamp_")));
}

#[test]
fn plan_carries_render_settings_and_description() {
    let mut render = RenderSettings::default();
    render.fps = 30;
    let doc = KitbashDocument {
        objects: vec![lamp()],
        render: Some(render.clone()),
        ..KitbashDocument::default()
    };
    let plan = flatten_into_plan(&doc, Some("lamp".into()));
    assert_eq!(plan.render, render);
    assert_eq!(plan.description.as_deref(), Some("lamp"));
    assert_eq!(plan.objects.len(), 2);

    let bare = flatten_into_plan(&KitbashDocument::default(), None);
    assert_eq!(bare.render, RenderSettings::default());
    assert!(bare.objects.is_empty());
}
