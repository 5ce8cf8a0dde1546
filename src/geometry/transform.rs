use crate::foundation::core::DMat4;
use crate::scene::model::Transform;

/// Compose an object pose from a [`Transform`].
///
/// Rotations are about the fixed world axes, X first, then Y, then Z, followed by the
/// translation:
///
/// `pose = T(location) * Rz(rz) * Ry(ry) * Rx(rx)`
///
/// Applied to a column vector this turns a point about world X before world Y and Z. `scale` is
/// not part of the pose; object size is carried by the dimensions.
pub fn compose(t: &Transform) -> DMat4 {
    let rot = t.rotation_degrees;
    DMat4::from_translation(t.location.into()) * rotation_xyz(rot.x, rot.y, rot.z)
}

/// Extrinsic X→Y→Z rotation from angles in degrees.
pub fn rotation_xyz(rx_deg: f64, ry_deg: f64, rz_deg: f64) -> DMat4 {
    DMat4::from_rotation_z(rz_deg.to_radians())
        * DMat4::from_rotation_y(ry_deg.to_radians())
        * DMat4::from_rotation_x(rx_deg.to_radians())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/transform.rs"]
mod tests;
