use crate::foundation::core::{DMat4, DVec3};

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Per-axis minimum.
    pub min: DVec3,
    /// Per-axis maximum.
    pub max: DVec3,
}

impl Aabb {
    /// Box spanning the two corners, in any order.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        Some(it.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }))
    }

    /// Smallest box containing both.
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Union of every box, or `None` when there are none.
    pub fn union_all(boxes: impl IntoIterator<Item = Self>) -> Option<Self> {
        boxes.into_iter().reduce(Self::union)
    }

    /// Midpoint.
    pub fn center(self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent per axis.
    pub fn size(self) -> DVec3 {
        self.max - self.min
    }

    /// Length of the diagonal.
    pub fn diagonal(self) -> f64 {
        self.size().length()
    }
}

/// Indexed triangle mesh in an object's local space.
///
/// Winding is counter-clockwise when viewed from outside.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocalMesh {
    /// Vertex positions.
    pub positions: Vec<DVec3>,
    /// Triangles as indices into `positions`.
    pub triangles: Vec<[u32; 3]>,
}

impl LocalMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Local-space bounds; `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Bounds of every vertex after applying `pose`.
    pub fn transformed_bounds(&self, pose: &DMat4) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().map(|p| pose.transform_point3(*p)))
    }

    /// Scale every vertex per axis.
    pub fn scaled(mut self, s: DVec3) -> Self {
        for p in &mut self.positions {
            *p *= s;
        }
        self
    }

    /// Triangle corners in local space.
    pub fn triangle(&self, tri: [u32; 3]) -> [DVec3; 3] {
        tri.map(|i| self.positions[i as usize])
    }

    pub(crate) fn push_vertex(&mut self, p: DVec3) -> u32 {
        let idx = self.positions.len() as u32;
        self.positions.push(p);
        idx
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mesh.rs"]
mod tests;
