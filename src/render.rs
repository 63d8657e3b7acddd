use crate::{Canvas, IconRingResult};

pub(crate) mod cpu;
pub(crate) mod overlay;
pub(crate) mod scene;

use scene::Scene;

/// A rendered canvas as RGBA8 pixels.
///
/// Renderers output **premultiplied alpha**; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug)]
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
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Something that can turn a [`Scene`] into pixels.
pub trait RenderBackend {
    /// Render every visible layer of `scene`, back to front, onto a transparent canvas.
    fn render_scene(&mut self, scene: &Scene) -> IconRingResult<FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend for `canvas`.
pub fn create_backend(kind: BackendKind, canvas: Canvas) -> IconRingResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(cpu::CpuRenderer::new(canvas)?)),
    }
}
