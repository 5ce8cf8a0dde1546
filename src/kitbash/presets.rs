use crate::foundation::error::PrimkitResult;
use crate::kitbash::model::{KitbashDocument, KitbashMeta, KitbashObject, KitbashPart};
use crate::kitbash::planner::{ExtractedObject, PartBudget, PartSynthesizer};
use crate::scene::model::PrimitiveKind;

/// Offline part synthesizer built from hand-made assemblies.
///
/// Tugboats and houses get their own assemblies, `cube`/`box` categories a single red cube, and
/// everything else a gray placeholder. Output is deterministic and honors the part budget.
#[derive(Clone, Copy, Debug, Default)]
pub struct PresetSynthesizer;

impl PartSynthesizer for PresetSynthesizer {
    fn synthesize(
        &self,
        objects: &[ExtractedObject],
        budget: PartBudget,
    ) -> PrimkitResult<KitbashDocument> {
        let objects = objects
            .iter()
            .map(|o| {
                let mut parts = preset_parts(&o.name, &o.category);
                parts.truncate(budget.max_parts.max(1) as usize);
                KitbashObject {
                    name: o.name.clone(),
                    parts,
                }
            })
            .collect();
        Ok(KitbashDocument {
            objects,
            meta: KitbashMeta {
                reality_factor: budget.reality_factor,
            },
            render: None,
        })
    }
}

/// The preset assembly for an object, chosen by category (and name, for tugboats).
pub fn preset_parts(name: &str, category: &str) -> Vec<KitbashPart> {
    let c = category.trim().to_lowercase();
    if c.contains("tugboat") || (c.contains("boat") && name.to_lowercase().contains("tug")) {
        return tugboat();
    }
    if c.contains("house") || c.contains("home") {
        return house();
    }
    if c == "cube" || c == "box" {
        return vec![
            KitbashPart::new("Box", PrimitiveKind::Cube)
                .at(0.0, 0.0, 0.5)
                .colored(0.8, 0.2, 0.2),
        ];
    }
    vec![
        KitbashPart::new("Placeholder", PrimitiveKind::Cube)
            .at(0.0, 0.0, 0.5)
            .colored(0.6, 0.6, 0.6),
    ]
}

/// Low hull along +X, cabin aft, stack on the cabin roof, cone bow and two fenders.
fn tugboat() -> Vec<KitbashPart> {
    let hull = [4.0, 2.0, 1.2];
    let hull_z = 0.6;
    let hull_top = hull_z + hull[2] / 2.0;
    let cabin = [1.6, 1.4, 1.0];
    let cabin_z = hull_top + cabin[2] / 2.0;
    let stack = [0.5, 0.5, 1.2];
    let stack_z = cabin_z + cabin[2] / 2.0 + stack[2] / 2.0;
    let bow = [0.8, 1.8, 0.8];
    let bow_x = hull[0] / 2.0 + bow[0] * 0.25;
    let fender = [0.4, 0.4, 0.4];
    let fender_y = hull[1] / 2.0 + fender[1] / 2.0 - 0.05;
    let hull_color = (0.63, 0.19, 0.15);

    vec![
        KitbashPart::new("Hull", PrimitiveKind::Cube)
            .sized(hull)
            .at(0.0, 0.0, hull_z)
            .colored(hull_color.0, hull_color.1, hull_color.2),
        KitbashPart::new("Cabin", PrimitiveKind::Cube)
            .sized(cabin)
            .at(-0.6, 0.0, cabin_z)
            .colored(0.85, 0.85, 0.8),
        KitbashPart::new("Stack", PrimitiveKind::Cylinder)
            .sized(stack)
            .at(0.2, 0.0, stack_z)
            .colored(0.2, 0.2, 0.2),
        KitbashPart::new("Bow", PrimitiveKind::Cone)
            .sized(bow)
            .at(bow_x, 0.0, hull_z + 0.2)
            .rotated(0.0, 90.0, 0.0)
            .colored(hull_color.0, hull_color.1, hull_color.2),
        KitbashPart::new("FenderPort", PrimitiveKind::Sphere)
            .sized(fender)
            .at(0.0, -fender_y, hull_z)
            .colored(0.1, 0.1, 0.1),
        KitbashPart::new("FenderStarboard", PrimitiveKind::Sphere)
            .sized(fender)
            .at(0.0, fender_y, hull_z)
            .colored(0.1, 0.1, 0.1),
    ]
}

/// Box body, cone roof, two windows and a door on the -Y face.
fn house() -> Vec<KitbashPart> {
    let body = [4.0, 4.0, 2.0];
    let body_z = body[2] / 2.0;
    let roof = [4.5, 4.5, 1.5];
    let roof_z = body_z + body[2] / 2.0 + roof[2] / 2.0;
    let front_y = -(body[1] / 2.0 + 0.01);
    let window = [0.8, 0.1, 0.8];
    let window_z = body_z + 0.5;

    vec![
        KitbashPart::new("Body", PrimitiveKind::Cube)
            .sized(body)
            .at(0.0, 0.0, body_z)
            .colored(0.75, 0.72, 0.68),
        KitbashPart::new("Roof", PrimitiveKind::Cone)
            .sized(roof)
            .at(0.0, 0.0, roof_z)
            .colored(0.5, 0.15, 0.12),
        KitbashPart::new("WindowL", PrimitiveKind::Cube)
            .sized(window)
            .at(-1.0, front_y, window_z)
            .colored(0.6, 0.85, 1.0),
        KitbashPart::new("WindowR", PrimitiveKind::Cube)
            .sized(window)
            .at(1.0, front_y, window_z)
            .colored(0.6, 0.85, 1.0),
        KitbashPart::new("Door", PrimitiveKind::Cube)
            .sized([1.0, 0.15, 1.6])
            .at(0.0, front_y, body_z - 0.2)
            .colored(0.3, 0.2, 0.1),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/kitbash/presets.rs"]
mod tests;
