use crate::foundation::core::Vec3;
use crate::kitbash::model::{KitbashDocument, KitbashObject, KitbashPart};
use crate::scene::model::{Color, ObjectSpec, ScenePlan, Transform};

/// Name used for objects that arrive without one.
pub const DEFAULT_OBJECT_NAME: &str = "object";
/// Name used for parts that arrive without one.
pub const DEFAULT_PART_NAME: &str = "part";

/// Turn every part of every object into a plan object named `"{object}_{part}"`.
///
/// Parts keep their type, dimensions, location and rotation; scale is fixed to one and a
/// missing color becomes neutral gray. Objects without parts contribute nothing.
pub fn flatten_objects(objects: &[KitbashObject]) -> Vec<ObjectSpec> {
    objects
        .iter()
        .flat_map(|o| {
            let base = non_empty(&o.name).unwrap_or(DEFAULT_OBJECT_NAME);
            o.parts.iter().map(move |p| flatten_part(base, p))
        })
        .collect()
}

/// Flatten a kitbash document into a scene plan.
///
/// The document's render settings are carried over when present. The result is not
/// normalized.
#[tracing::instrument(skip(doc), fields(objects = doc.objects.len(), parts = doc.part_count()))]
pub fn flatten_into_plan(doc: &KitbashDocument, description: Option<String>) -> ScenePlan {
    let objects = flatten_objects(&doc.objects);
    if objects.is_empty() {
        tracing::warn!("kitbash document has no parts");
    }
    ScenePlan {
        description,
        render: doc.render.clone().unwrap_or_default(),
        ..ScenePlan::with_objects(objects)
    }
}

pub(crate) fn flatten_part(prefix: &str, p: &KitbashPart) -> ObjectSpec {
    let part = non_empty(&p.name).unwrap_or(DEFAULT_PART_NAME);
    ObjectSpec {
        name: format!("{prefix}_{part}"),
        kind: p.kind.clone(),
        color: p.color.unwrap_or(Color::NEUTRAL_GRAY),
        dimensions: p.dimensions.clone(),
        transform: Transform {
            location: p.location,
            rotation_degrees: p.rotation_degrees,
            scale: Vec3::ONE,
        },
        animation: None,
    }
}

fn non_empty(s: &str) -> Option<&str> {
    Some(s.trim()).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/kitbash/flatten.rs"]
mod tests;
