use std::collections::BTreeMap;
use std::f64::consts::TAU;

use crate::foundation::core::DVec3;
use crate::foundation::error::{PrimkitError, PrimkitResult};
use crate::geometry::mesh::LocalMesh;
use crate::scene::model::{ObjectKind, PrimitiveKind};

/// Radial segments of cylinders and cones.
pub const RADIAL_SEGMENTS: u32 = 64;
/// Segments around a torus' major circle.
pub const TORUS_MAJOR_SEGMENTS: u32 = 64;
/// Segments around a torus' tube.
pub const TORUS_MINOR_SEGMENTS: u32 = 32;
/// Icosahedron subdivision passes for spheres.
pub const SPHERE_SUBDIVISIONS: u32 = 3;
/// Planes are thin boxes at least this thick.
pub const MIN_PLANE_THICKNESS: f64 = 0.01;

/// A primitive with its dimensions resolved into shape parameters.
///
/// Every shape is centered on the local origin; round shapes use local +Z as their axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// Box with the given full extents.
    Cube {
        /// Extent along each local axis.
        extents: DVec3,
    },
    /// Unit sphere scaled per axis.
    Sphere {
        /// Radius along each local axis.
        radii: DVec3,
    },
    /// Capped cylinder along +Z.
    Cylinder {
        /// Radius.
        radius: f64,
        /// Height along Z.
        height: f64,
    },
    /// Capped cone along +Z, apex up.
    Cone {
        /// Base radius.
        radius: f64,
        /// Height along Z.
        height: f64,
    },
    /// Thin box lying in the XY plane.
    Plane {
        /// Extent along X.
        width: f64,
        /// Extent along Y.
        depth: f64,
        /// Extent along Z.
        thickness: f64,
    },
    /// Ring surface in the XY plane.
    Torus {
        /// Distance from the center to the middle of the tube.
        major_radius: f64,
        /// Tube radius.
        minor_radius: f64,
    },
}

impl Primitive {
    /// Resolve plan dimensions for `kind` into shape parameters.
    ///
    /// Fails when fewer dimensions are supplied than the shape needs or a needed value is not
    /// finite. Normalized plans always satisfy both.
    pub fn from_dimensions(kind: PrimitiveKind, dims: &[f64]) -> PrimkitResult<Self> {
        let need = |n: usize| {
            if dims.len() < n {
                return Err(PrimkitError::validation(format!(
                    "{kind} needs at least {n} dimensions, got {}",
                    dims.len()
                )));
            }
            match dims[..n].iter().find(|d| !d.is_finite()) {
                Some(d) => Err(PrimkitError::geometry(format!(
                    "{kind} dimension is not finite: {d}"
                ))),
                None => Ok(()),
            }
        };

        let prim = match kind {
            PrimitiveKind::Cube => {
                need(3)?;
                Self::Cube {
                    extents: DVec3::new(dims[0], dims[1], dims[2]),
                }
            }
            PrimitiveKind::Sphere => {
                if dims.len() == 1 {
                    need(1)?;
                    Self::Sphere {
                        radii: DVec3::splat(dims[0]),
                    }
                } else {
                    need(3)?;
                    Self::Sphere {
                        radii: DVec3::new(dims[0], dims[1], dims[2]),
                    }
                }
            }
            PrimitiveKind::Cylinder => {
                need(2)?;
                let (radius, height) = radius_height(dims)?;
                Self::Cylinder { radius, height }
            }
            PrimitiveKind::Cone => {
                need(2)?;
                let (radius, height) = radius_height(dims)?;
                Self::Cone { radius, height }
            }
            PrimitiveKind::Plane => {
                need(2)?;
                let thickness = dims
                    .get(2)
                    .copied()
                    .filter(|t| t.is_finite())
                    .unwrap_or(MIN_PLANE_THICKNESS)
                    .max(MIN_PLANE_THICKNESS);
                Self::Plane {
                    width: dims[0],
                    depth: dims[1],
                    thickness,
                }
            }
            PrimitiveKind::Torus => {
                need(1)?;
                let d0 = dims[0];
                let d1 = dims.get(1).copied().unwrap_or(d0);
                // X and Y are major diameters, Z the tube diameter.
                let tube = match dims.get(2) {
                    Some(&t) => t,
                    None => {
                        let base = if d0 == 0.0 { 1.0 } else { d0 };
                        (0.2 * base).max(0.1)
                    }
                };
                if !(d1.is_finite() && tube.is_finite()) {
                    return Err(PrimkitError::geometry("torus dimension is not finite"));
                }
                Self::Torus {
                    major_radius: (d0 + d1) / 2.0 * 0.5,
                    minor_radius: tube * 0.5,
                }
            }
        };
        Ok(prim)
    }

    /// The primitive type this shape was built from.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Cube { .. } => PrimitiveKind::Cube,
            Self::Sphere { .. } => PrimitiveKind::Sphere,
            Self::Cylinder { .. } => PrimitiveKind::Cylinder,
            Self::Cone { .. } => PrimitiveKind::Cone,
            Self::Plane { .. } => PrimitiveKind::Plane,
            Self::Torus { .. } => PrimitiveKind::Torus,
        }
    }

    /// Tessellate into a local-space mesh.
    pub fn mesh(&self) -> LocalMesh {
        match *self {
            Self::Cube { extents } => cuboid(extents),
            Self::Sphere { radii } => icosphere(SPHERE_SUBDIVISIONS).scaled(radii),
            Self::Cylinder { radius, height } => cylinder(radius, height, RADIAL_SEGMENTS),
            Self::Cone { radius, height } => cone(radius, height, RADIAL_SEGMENTS),
            Self::Plane {
                width,
                depth,
                thickness,
            } => cuboid(DVec3::new(width, depth, thickness)),
            Self::Torus {
                major_radius,
                minor_radius,
            } => torus(
                major_radius,
                minor_radius,
                TORUS_MAJOR_SEGMENTS,
                TORUS_MINOR_SEGMENTS,
            ),
        }
    }
}

/// Build the local mesh for an object type and its dimensions.
///
/// Returns `Ok(None)` for types that are not supported primitives.
pub fn build(kind: &ObjectKind, dims: &[f64]) -> PrimkitResult<Option<LocalMesh>> {
    let Some(kind) = kind.primitive() else {
        return Ok(None);
    };
    Primitive::from_dimensions(kind, dims).map(|p| Some(p.mesh()))
}

fn radius_height(dims: &[f64]) -> PrimkitResult<(f64, f64)> {
    let height = if dims.len() > 2 { dims[2] } else { dims[1] };
    if !height.is_finite() {
        return Err(PrimkitError::geometry("height is not finite"));
    }
    Ok((dims[0], height))
}

/// Append a triangle of a shape that is convex around the origin, flipping it to face outward.
fn push_outward(mesh: &mut LocalMesh, a: u32, b: u32, c: u32) {
    let [pa, pb, pc] = mesh.triangle([a, b, c]);
    let n = (pb - pa).cross(pc - pa);
    let centroid = (pa + pb + pc) / 3.0;
    if n.dot(centroid) < 0.0 {
        mesh.triangles.push([a, c, b]);
    } else {
        mesh.triangles.push([a, b, c]);
    }
}

fn cuboid(extents: DVec3) -> LocalMesh {
    let h = extents * 0.5;
    let mut m = LocalMesh::default();
    // Corner index bits: 1 = +X, 2 = +Y, 4 = +Z.
    for i in 0..8u32 {
        let pick = |bit: u32, v: f64| if i & bit != 0 { v } else { -v };
        m.push_vertex(DVec3::new(pick(1, h.x), pick(2, h.y), pick(4, h.z)));
    }
    const FACES: [[u32; 4]; 6] = [
        [0, 2, 6, 4],
        [1, 5, 7, 3],
        [0, 4, 5, 1],
        [2, 3, 7, 6],
        [0, 1, 3, 2],
        [4, 6, 7, 5],
    ];
    for [a, b, c, d] in FACES {
        push_outward(&mut m, a, b, c);
        push_outward(&mut m, a, c, d);
    }
    m
}

fn ring_point(radius: f64, i: u32, segments: u32, z: f64) -> DVec3 {
    let u = TAU * f64::from(i) / f64::from(segments);
    DVec3::new(radius * u.cos(), radius * u.sin(), z)
}

fn cylinder(radius: f64, height: f64, segments: u32) -> LocalMesh {
    let (z0, z1) = (-height * 0.5, height * 0.5);
    let mut m = LocalMesh::default();
    for i in 0..segments {
        m.push_vertex(ring_point(radius, i, segments, z0));
    }
    for i in 0..segments {
        m.push_vertex(ring_point(radius, i, segments, z1));
    }
    let bottom = m.push_vertex(DVec3::new(0.0, 0.0, z0));
    let top = m.push_vertex(DVec3::new(0.0, 0.0, z1));

    for i in 0..segments {
        let j = (i + 1) % segments;
        let (b0, b1, t0, t1) = (i, j, segments + i, segments + j);
        push_outward(&mut m, b0, b1, t1);
        push_outward(&mut m, b0, t1, t0);
        push_outward(&mut m, bottom, b1, b0);
        push_outward(&mut m, top, t0, t1);
    }
    m
}

fn cone(radius: f64, height: f64, segments: u32) -> LocalMesh {
    let (z0, z1) = (-height * 0.5, height * 0.5);
    let mut m = LocalMesh::default();
    for i in 0..segments {
        m.push_vertex(ring_point(radius, i, segments, z0));
    }
    let base = m.push_vertex(DVec3::new(0.0, 0.0, z0));
    let apex = m.push_vertex(DVec3::new(0.0, 0.0, z1));

    for i in 0..segments {
        let j = (i + 1) % segments;
        push_outward(&mut m, i, j, apex);
        push_outward(&mut m, base, j, i);
    }
    m
}

fn icosphere(subdivisions: u32) -> LocalMesh {
    let t = (1.0 + 5f64.sqrt()) / 2.0;
    let mut m = LocalMesh::default();
    for [x, y, z] in [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ] {
        m.push_vertex(DVec3::new(x, y, z).normalize());
    }
    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: BTreeMap<(u32, u32), u32> = BTreeMap::new();
        let mut mid = |m: &mut LocalMesh, a: u32, b: u32| {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let p = (m.positions[a as usize] + m.positions[b as usize]).normalize();
                m.push_vertex(p)
            })
        };
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = mid(&mut m, a, b);
            let bc = mid(&mut m, b, c);
            let ca = mid(&mut m, c, a);
            next.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        faces = next;
    }

    for [a, b, c] in faces {
        push_outward(&mut m, a, b, c);
    }
    m
}

fn torus(major: f64, minor: f64, seg_u: u32, seg_v: u32) -> LocalMesh {
    let mut m = LocalMesh::default();
    for i in 0..seg_u {
        let u = TAU * f64::from(i) / f64::from(seg_u);
        for j in 0..seg_v {
            let v = TAU * f64::from(j) / f64::from(seg_v);
            let ring = major + minor * v.cos();
            m.push_vertex(DVec3::new(ring * u.cos(), ring * u.sin(), minor * v.sin()));
        }
    }

    let vid = |i: u32, j: u32| (i % seg_u) * seg_v + (j % seg_v);
    // Not convex, so winding is fixed by construction: du x dv points away from the tube axis.
    for i in 0..seg_u {
        for j in 0..seg_v {
            let a = vid(i, j);
            let b = vid(i + 1, j);
            let c = vid(i + 1, j + 1);
            let d = vid(i, j + 1);
            m.triangles.push([a, b, c]);
            m.triangles.push([a, c, d]);
        }
    }
    m
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/primitive.rs"]
mod tests;
