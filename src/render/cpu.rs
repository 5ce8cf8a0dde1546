use crate::foundation::core::{DMat4, DVec3};
use crate::foundation::error::{PrimkitError, PrimkitResult};
use crate::geometry::scene::SceneGeometry;
use crate::render::backend::{FrameRGBA, PreviewSettings, RenderBackend};
use crate::scene::model::Color;

/// Triangles with a vertex closer than this to the eye plane are not drawn.
const NEAR: f64 = 0.01;
/// Share of the surface color lit regardless of orientation.
const AMBIENT: f64 = 0.25;
/// Unnormalized direction toward the key light, in world space.
const KEY_LIGHT: DVec3 = DVec3::new(0.4, -0.5, 0.8);

/// Flat-shaded z-buffer rasterizer for quick previews of compiled scenes.
///
/// Uses the scene camera's pose and vertical field of view. Each triangle gets one Lambert
/// intensity from a fixed key light plus ambient, with normals turned toward the viewer.
#[derive(Clone, Debug, Default)]
pub struct CpuPreviewBackend {
    settings: PreviewSettings,
}

impl CpuPreviewBackend {
    /// Create a backend.
    pub fn new(settings: PreviewSettings) -> Self {
        Self { settings }
    }

    /// Output size for a scene after downscaling, at least one pixel per axis.
    pub fn output_size(&self, scene: &SceneGeometry) -> (u32, u32) {
        let d = self.settings.downscale.max(1);
        let (w, h) = scene.resolution;
        ((w / d).max(1), (h / d).max(1))
    }
}

impl RenderBackend for CpuPreviewBackend {
    #[tracing::instrument(skip(self, scene), fields(objects = scene.objects.len()))]
    fn render(&mut self, scene: &SceneGeometry) -> PrimkitResult<FrameRGBA> {
        let (w, h) = self.output_size(scene);
        let bg = scene.background.to_rgb8();
        let mut frame = FrameRGBA::filled(w, h, [bg[0], bg[1], bg[2], 255]);

        let view = scene.camera.pose.inverse();
        if !view.is_finite() {
            return Err(PrimkitError::geometry("camera pose is not invertible"));
        }
        let proj = Projection::new(scene.camera.yfov_deg, w, h);
        let light = KEY_LIGHT.normalize();
        let mut inv_depth = vec![0.0f64; w as usize * h as usize];
        let mut drawn = 0usize;

        for obj in &scene.objects {
            let to_view: DMat4 = view * obj.pose;
            for &tri in &obj.mesh.triangles {
                let local = obj.mesh.triangle(tri);
                let world = local.map(|p| obj.pose.transform_point3(p));
                let eye_space = local.map(|p| to_view.transform_point3(p));
                if eye_space.iter().any(|p| p.z > -NEAR) {
                    continue;
                }

                let Some(mut n) = (world[1] - world[0])
                    .cross(world[2] - world[0])
                    .try_normalize()
                else {
                    continue;
                };
                let centroid = (world[0] + world[1] + world[2]) / 3.0;
                if n.dot(scene.camera.eye - centroid) < 0.0 {
                    n = -n;
                }
                let intensity = AMBIENT + (1.0 - AMBIENT) * n.dot(light).max(0.0);
                let rgba = shade(obj.color, intensity);

                let screen = eye_space.map(|p| proj.to_screen(p));
                if raster_triangle(&mut frame, &mut inv_depth, screen, rgba) {
                    drawn += 1;
                }
            }
        }

        tracing::debug!(width = w, height = h, drawn, "preview rendered");
        Ok(frame)
    }
}

struct Projection {
    focal: f64,
    aspect: f64,
    width: f64,
    height: f64,
}

impl Projection {
    fn new(yfov_deg: f64, w: u32, h: u32) -> Self {
        Self {
            focal: 1.0 / (yfov_deg.to_radians() * 0.5).tan(),
            aspect: f64::from(w) / f64::from(h),
            width: f64::from(w),
            height: f64::from(h),
        }
    }

    /// Pixel coordinates plus `1 / depth` for a point in eye space.
    fn to_screen(&self, p: DVec3) -> DVec3 {
        let depth = -p.z;
        let ndc_x = self.focal / self.aspect * p.x / depth;
        let ndc_y = self.focal * p.y / depth;
        DVec3::new(
            (ndc_x + 1.0) * 0.5 * self.width,
            (1.0 - ndc_y) * 0.5 * self.height,
            1.0 / depth,
        )
    }
}

fn shade(c: Color, intensity: f64) -> [u8; 4] {
    let [r, g, b] = Color::new(c.r * intensity, c.g * intensity, c.b * intensity).to_rgb8();
    [r, g, b, 255]
}

fn edge(a: DVec3, b: DVec3, px: f64, py: f64) -> f64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Fill pixels whose centers fall inside the triangle and pass the depth test.
///
/// Depth is compared as interpolated `1 / depth`, larger is nearer. Returns whether any pixel
/// was written.
fn raster_triangle(
    frame: &mut FrameRGBA,
    inv_depth: &mut [f64],
    [a, b, c]: [DVec3; 3],
    rgba: [u8; 4],
) -> bool {
    let area = edge(a, b, c.x, c.y);
    if area.abs() < 1e-12 {
        return false;
    }

    let (w, h) = (frame.width as i64, frame.height as i64);
    let x0 = a.x.min(b.x).min(c.x).floor().max(0.0) as i64;
    let x1 = (a.x.max(b.x).max(c.x).ceil() as i64).min(w - 1);
    let y0 = a.y.min(b.y).min(c.y).floor().max(0.0) as i64;
    let y1 = (a.y.max(b.y).max(c.y).ceil() as i64).min(h - 1);

    let mut wrote = false;
    for y in y0..=y1 {
        let py = y as f64 + 0.5;
        for x in x0..=x1 {
            let px = x as f64 + 0.5;
            let w0 = edge(b, c, px, py) / area;
            let w1 = edge(c, a, px, py) / area;
            let w2 = edge(a, b, px, py) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }
            let z = w0 * a.z + w1 * b.z + w2 * c.z;
            let idx = y as usize * frame.width as usize + x as usize;
            if z <= inv_depth[idx] {
                continue;
            }
            inv_depth[idx] = z;
            frame.data[idx * 4..idx * 4 + 4].copy_from_slice(&rgba);
            wrote = true;
        }
    }
    wrote
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
