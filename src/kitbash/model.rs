use serde::{Deserialize, Serialize};

use crate::foundation::core::Vec3;
use crate::scene::model::{Color, ObjectKind, PrimitiveKind, RenderSettings};

/// Intermediate document produced by part synthesis: objects decomposed into primitive parts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KitbashDocument {
    /// Decomposed objects.
    #[serde(default)]
    pub objects: Vec<KitbashObject>,
    /// Synthesis metadata.
    #[serde(default)]
    pub meta: KitbashMeta,
    /// Render settings carried through flattening when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderSettings>,
}

/// One high-level object and its parts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KitbashObject {
    /// Object name; parts are prefixed with it.
    #[serde(default)]
    pub name: String,
    /// Primitive parts.
    #[serde(default)]
    pub parts: Vec<KitbashPart>,
}

/// A primitive part positioned relative to its object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KitbashPart {
    /// Part name.
    #[serde(default)]
    pub name: String,
    /// Primitive type.
    #[serde(rename = "type", default = "default_part_kind")]
    pub kind: ObjectKind,
    /// Overall extents.
    #[serde(default = "default_part_dimensions")]
    pub dimensions: Vec<f64>,
    /// Position.
    #[serde(default)]
    pub location: Vec3,
    /// Extrinsic X→Y→Z rotation in degrees.
    #[serde(default)]
    pub rotation_degrees: Vec3,
    /// Color; `[r, g, b]` arrays are accepted.
    #[serde(default)]
    pub color: Option<Color>,
}

fn default_part_kind() -> ObjectKind {
    ObjectKind::Primitive(PrimitiveKind::Cube)
}

fn default_part_dimensions() -> Vec<f64> {
    vec![1.0, 1.0, 1.0]
}

impl KitbashPart {
    /// A part with unit dimensions and no color at the origin.
    pub fn new(name: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            dimensions: default_part_dimensions(),
            location: Vec3::ZERO,
            rotation_degrees: Vec3::ZERO,
            color: None,
        }
    }

    /// Replace the dimensions.
    pub fn sized(mut self, dims: [f64; 3]) -> Self {
        self.dimensions = dims.to_vec();
        self
    }

    /// Replace the location.
    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.location = Vec3::new(x, y, z);
        self
    }

    /// Replace the rotation.
    pub fn rotated(mut self, x: f64, y: f64, z: f64) -> Self {
        self.rotation_degrees = Vec3::new(x, y, z);
        self
    }

    /// Set the color.
    pub fn colored(mut self, r: f64, g: f64, b: f64) -> Self {
        self.color = Some(Color::new(r, g, b));
        self
    }
}

/// Metadata reported alongside synthesized parts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitbashMeta {
    /// Reality factor the parts were synthesized for.
    #[serde(default, deserialize_with = "crate::foundation::core::de_lenient_u32")]
    pub reality_factor: u32,
}

impl KitbashDocument {
    /// Total number of parts across all objects.
    pub fn part_count(&self) -> usize {
        self.objects.iter().map(|o| o.parts.len()).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kitbash/model.rs"]
mod tests;
