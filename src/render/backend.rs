use crate::foundation::error::PrimkitResult;
use crate::geometry::scene::SceneGeometry;

/// A rendered frame as RGBA8 pixels.
///
/// Preview frames are fully opaque, so `premultiplied` is informational only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// A frame filled with one color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            data: rgba.repeat(n),
            premultiplied: false,
        }
    }

    /// The pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4)?.try_into().ok()
    }
}

/// A renderer that turns compiled scene geometry into pixels.
pub trait RenderBackend {
    /// Render one still frame.
    fn render(&mut self, scene: &SceneGeometry) -> PrimkitResult<FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Flat-shaded software rasterizer.
    CpuPreview,
}

/// Backend-agnostic settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewSettings {
    /// Integer factor the plan resolution is divided by; 0 is treated as 1.
    pub downscale: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self { downscale: 1 }
    }
}

/// Create a rendering backend implementation.
pub fn create_backend(
    kind: BackendKind,
    settings: PreviewSettings,
) -> PrimkitResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::CpuPreview => Ok(Box::new(crate::render::cpu::CpuPreviewBackend::new(
            settings,
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
