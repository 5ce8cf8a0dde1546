use crate::foundation::core::{DMat4, DVec3, DVec4};
use crate::geometry::mesh::Aabb;

/// Vertical field of view of every framed camera, in degrees.
pub const YFOV_DEG: f64 = 45.0;
/// Up direction used for every look-at basis.
pub const WORLD_UP: DVec3 = DVec3::Z;
/// Distance used when there is nothing to frame.
pub const EMPTY_SCENE_DISTANCE: f64 = 5.0;
/// Camera distance per unit of scene diagonal.
pub const DISTANCE_PER_DIAGONAL: f64 = 1.8;
/// Closest the camera is placed to the target.
pub const MIN_DISTANCE: f64 = 1.0;
/// Unnormalized direction from the target to the eye.
pub const EYE_OFFSET: DVec3 = DVec3::new(1.2, 1.2, 0.8);

/// A camera placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framing {
    /// Camera position.
    pub eye: DVec3,
    /// Point the camera looks at.
    pub target: DVec3,
    /// Distance from eye to target.
    pub distance: f64,
    /// Camera-to-world pose: columns are right, up, backward and the eye.
    pub pose: DMat4,
    /// Vertical field of view in degrees.
    pub yfov_deg: f64,
}

impl Framing {
    /// Camera at `eye` looking at `target`.
    pub fn looking_at(eye: DVec3, target: DVec3) -> Self {
        Self {
            eye,
            target,
            distance: eye.distance(target),
            pose: look_at(eye, target),
            yfov_deg: YFOV_DEG,
        }
    }

    /// Unit vector from the eye toward the target.
    pub fn forward(&self) -> DVec3 {
        -self.pose.z_axis.truncate()
    }
}

/// Frame world-space bounds so every box is in view.
///
/// Nothing to frame puts the target at the origin at distance 5. Otherwise the target is the
/// center of the union box and the distance is `max(1, 1.8 * diagonal)`, viewed from the
/// `(1.2, 1.2, 0.8)` direction.
pub fn frame(bounds: &[Aabb]) -> Framing {
    let (target, distance) = match Aabb::union_all(bounds.iter().copied()) {
        None => (DVec3::ZERO, EMPTY_SCENE_DISTANCE),
        Some(all) => (
            all.center(),
            (DISTANCE_PER_DIAGONAL * all.diagonal()).max(MIN_DISTANCE),
        ),
    };
    let eye = target + EYE_OFFSET.normalize() * distance;
    Framing {
        eye,
        target,
        distance,
        pose: look_at(eye, target),
        yfov_deg: YFOV_DEG,
    }
}

/// Camera-to-world basis at `eye` facing `target` with [`WORLD_UP`] as up.
///
/// When the view direction is parallel to up, +Y is used as the up hint instead.
pub fn look_at(eye: DVec3, target: DVec3) -> DMat4 {
    let forward = (target - eye).try_normalize().unwrap_or(DVec3::NEG_Z);
    let right = forward
        .cross(WORLD_UP)
        .try_normalize()
        .or_else(|| forward.cross(DVec3::Y).try_normalize())
        .unwrap_or(DVec3::X);
    let up = right.cross(forward);
    DMat4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        (-forward).extend(0.0),
        DVec4::new(eye.x, eye.y, eye.z, 1.0),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/framing.rs"]
mod tests;
