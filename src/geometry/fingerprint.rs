use std::fmt;

use xxhash_rust::xxh3::Xxh3;

use crate::foundation::core::{DMat4, DVec3};
use crate::geometry::framing::Framing;
use crate::geometry::mesh::LocalMesh;
use crate::geometry::scene::SceneGeometry;
use crate::scene::model::Color;

const XXH3_SEED: u64 = 0x5c3e_9a1d_07b2_f46e;

/// Stable 128-bit digest of geometry, used to compare builds across runs and backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl fmt::Display for GeometryFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint a local mesh over the exact bits of every coordinate and index.
pub fn fingerprint_mesh(mesh: &LocalMesh) -> GeometryFingerprint {
    let mut h = StableHasher::new();
    write_mesh(&mut h, mesh);
    h.finish()
}

/// Fingerprint a compiled scene: objects in order, their poses, colors and the camera.
///
/// Object names are included so renaming changes the digest.
pub fn fingerprint_scene(scene: &SceneGeometry) -> GeometryFingerprint {
    let mut h = StableHasher::new();
    h.write_u32(scene.objects.len() as u32);
    for o in &scene.objects {
        h.write_str(&o.name);
        h.write_str(o.kind.as_str());
        write_color(&mut h, o.color);
        write_mesh(&mut h, &o.mesh);
        write_mat4(&mut h, &o.pose);
    }
    write_framing(&mut h, &scene.camera);
    write_color(&mut h, scene.background);
    h.write_u32(scene.resolution.0);
    h.write_u32(scene.resolution.1);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> GeometryFingerprint {
        let v = self.inner.digest128();
        GeometryFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_vec3(h: &mut StableHasher, v: DVec3) {
    for c in v.to_array() {
        h.write_f64(c);
    }
}

fn write_mat4(h: &mut StableHasher, m: &DMat4) {
    for c in m.to_cols_array() {
        h.write_f64(c);
    }
}

fn write_color(h: &mut StableHasher, c: Color) {
    for v in c.to_array() {
        h.write_f64(v);
    }
}

fn write_mesh(h: &mut StableHasher, mesh: &LocalMesh) {
    h.write_u32(mesh.positions.len() as u32);
    for p in &mesh.positions {
        write_vec3(h, *p);
    }
    h.write_u32(mesh.triangles.len() as u32);
    for t in &mesh.triangles {
        for i in t {
            h.write_u32(*i);
        }
    }
}

fn write_framing(h: &mut StableHasher, f: &Framing) {
    write_vec3(h, f.eye);
    write_vec3(h, f.target);
    h.write_f64(f.distance);
    write_mat4(h, &f.pose);
    h.write_f64(f.yfov_deg);
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fingerprint.rs"]
mod tests;
