use serde::{Deserialize, Serialize};

pub use glam::{DMat4, DVec3, DVec4};

/// A 3-component vector as it appears in scene documents.
///
/// Serialized as a `[x, y, z]` array. Deserialization is lenient: arrays shorter than three
/// components are zero-filled, extra components are ignored, and `{x, y, z}` objects are
/// accepted as well.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// All components zero.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// All components one.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Build a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build a vector from a slice, zero-filling missing components.
    pub fn from_slice(vals: &[f64]) -> Self {
        let at = |i: usize| vals.get(i).copied().unwrap_or(0.0);
        Self::new(at(0), at(1), at(2))
    }

    /// Components as an array.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Clamp every component into `[lo, hi]`, treating non-finite values as zero.
    pub fn clamped(self, lo: f64, hi: f64) -> Self {
        Self::new(
            clamp_finite(self.x, lo, hi),
            clamp_finite(self.y, lo, hi),
            clamp_finite(self.z, lo, hi),
        )
    }
}

impl From<Vec3> for DVec3 {
    fn from(v: Vec3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

impl From<DVec3> for Vec3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Serialize for Vec3 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Vec3 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr(Vec<f64>),
            Obj {
                #[serde(default)]
                x: f64,
                #[serde(default)]
                y: f64,
                #[serde(default)]
                z: f64,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr(vals) => Ok(Self::from_slice(&vals)),
            Repr::Obj { x, y, z } => Ok(Self::new(x, y, z)),
        }
    }
}

/// Clamp `v` into `[lo, hi]`; NaN and infinities are treated as a missing value (zero).
pub fn clamp_finite(v: f64, lo: f64, hi: f64) -> f64 {
    let v = if v.is_finite() { v } else { 0.0 };
    v.clamp(lo, hi)
}

/// Deserialize an unsigned integer setting from any JSON number.
///
/// Fractions truncate toward zero, negative values saturate to `0` and values beyond `u32`
/// saturate to `u32::MAX`; range policy is left to normalization.
pub(crate) fn de_lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;
    if v.is_nan() {
        return Ok(0);
    }
    // `as` saturates for floats.
    Ok(v.trunc() as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
