use std::sync::Arc;

use crate::{
    assets::SourceImage,
    foundation::core::{Affine, BezPath, Canvas, Point},
    foundation::error::{IconRingError, IconRingResult},
    foundation::math::{mask_apply_alpha, premul_over_in_place},
    geometry::ring::RingGeometry,
    render::scene::{ImageLayer, Layer, Scene},
    render::{FrameRGBA, RenderBackend},
};

/// CPU renderer powered by `vello_cpu`.
///
/// The uploaded image is painted through its placement transform, multiplied by an alpha mask
/// rasterized from the ring path, then the overlay raster is composited on top.
pub struct CpuRenderer {
    canvas: Canvas,
    width: u16,
    height: u16,
    image_cache: Option<CachedPaint>,
}

struct CachedPaint {
    source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

impl CpuRenderer {
    /// Create a renderer targeting `canvas`.
    pub fn new(canvas: Canvas) -> IconRingResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| IconRingError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| IconRingError::render("canvas height exceeds u16"))?;
        Ok(Self {
            canvas,
            width,
            height,
            image_cache: None,
        })
    }

    /// Target canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Rasterize the ring as a premultiplied white-on-transparent RGBA8 mask.
    pub fn render_ring_mask(&self, ring: &RingGeometry) -> IconRingResult<Vec<u8>> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        let path = ring.to_path();
        if !path.elements().is_empty() {
            let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_fill_rule(vello_cpu::peniko::Fill::NonZero);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            ctx.fill_path(&bezpath_to_cpu(&path));
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
        }
        Ok(pixmap.data_as_u8_slice().to_vec())
    }

    /// Paint the placed image without any clipping.
    pub fn render_placed_image(&mut self, layer: &ImageLayer) -> IconRingResult<Vec<u8>> {
        let paint = self.image_paint_for(&layer.image)?;
        let (w, h) = (
            f64::from(layer.image.width),
            f64::from(layer.image.height),
        );

        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(layer.placement.transform(self.canvas)));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }

    fn render_image_layer(&mut self, layer: &ImageLayer) -> IconRingResult<Vec<u8>> {
        let placed = self.render_placed_image(layer)?;
        let mask = self.render_ring_mask(&layer.ring)?;
        let mut out = vec![0u8; placed.len()];
        mask_apply_alpha(&placed, &mask, &mut out)?;
        Ok(out)
    }

    fn image_paint_for(&mut self, image: &SourceImage) -> IconRingResult<vello_cpu::Image> {
        if let Some(cached) = &self.image_cache
            && Arc::ptr_eq(&cached.source, &image.rgba8_premul)
        {
            return Ok(cached.paint.clone());
        }

        let pixmap =
            image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache = Some(CachedPaint {
            source: image.rgba8_premul.clone(),
            paint: paint.clone(),
        });
        Ok(paint)
    }
}

impl RenderBackend for CpuRenderer {
    #[tracing::instrument(skip_all, fields(layers = scene.layers.len()))]
    fn render_scene(&mut self, scene: &Scene) -> IconRingResult<FrameRGBA> {
        if scene.canvas != self.canvas {
            return Err(IconRingError::render(format!(
                "scene canvas {}x{} does not match renderer canvas {}x{}",
                scene.canvas.width, scene.canvas.height, self.canvas.width, self.canvas.height
            )));
        }

        let mut data = vec![0u8; self.canvas.rgba_len()];
        for layer in &scene.layers {
            match layer {
                Layer::Image(image_layer) => {
                    let masked = self.render_image_layer(image_layer)?;
                    premul_over_in_place(&mut data, &masked)?;
                }
                Layer::Overlay(guide) => {
                    if guide.width() != self.canvas.width || guide.height() != self.canvas.height
                    {
                        return Err(IconRingError::render(
                            "overlay raster size does not match canvas",
                        ));
                    }
                    premul_over_in_place(&mut data, guide.rgba8_premul())?;
                }
            }
        }

        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
            premultiplied: true,
        })
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> IconRingResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| IconRingError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| IconRingError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(IconRingError::render("source image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
