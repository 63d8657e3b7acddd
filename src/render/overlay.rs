use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::{
    foundation::core::Canvas,
    foundation::error::{IconRingError, IconRingResult},
};

/// Look of the editing guide drawn over the canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayStyle {
    /// Radius of the dashed guide circle, slightly inside the largest ring.
    pub radius: f64,
    /// Centered label text.
    pub label: String,
    /// Label font size in pixels.
    pub font_size: f64,
    /// Dash and gap length of the circle outline.
    pub dash: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            radius: 240.0,
            label: "ICON AREA".to_string(),
            font_size: 24.0,
            dash: 5.0,
        }
    }
}

/// Rasterized editing guide: a translucent dashed circle with a label.
///
/// Built once and reused; hiding the overlay only drops it from the scene.
#[derive(Clone, Debug)]
pub struct OverlayGuide {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl OverlayGuide {
    /// Build the guide for `canvas`, loading system fonts plus any in `font_dir`.
    #[tracing::instrument(skip(style))]
    pub fn build(
        canvas: Canvas,
        style: &OverlayStyle,
        font_dir: Option<&Path>,
    ) -> IconRingResult<Self> {
        let svg = overlay_svg(canvas, style)?;
        let opts = usvg::Options {
            fontdb: build_fontdb(font_dir),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse overlay svg")?;
        let rgba8_premul = rasterize_svg_to_premul_rgba8(&tree, canvas.width, canvas.height)?;
        tracing::debug!(radius = style.radius, "built overlay guide");
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 pixels covering the whole canvas.
    pub fn rgba8_premul(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }
}

fn overlay_svg(canvas: Canvas, style: &OverlayStyle) -> IconRingResult<String> {
    for (name, v) in [
        ("radius", style.radius),
        ("font_size", style.font_size),
        ("dash", style.dash),
    ] {
        if !v.is_finite() || v < 0.0 {
            return Err(IconRingError::validation(format!(
                "overlay {name} must be a finite non-negative number"
            )));
        }
    }

    let c = canvas.center();
    let (w, h) = (canvas.width, canvas.height);
    Ok(format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <circle cx="{cx}" cy="{cy}" r="{r}" fill="#ffffff" fill-opacity="0.2" stroke="#ffffff" stroke-width="1" stroke-dasharray="{dash} {dash}"/>
  <text x="{cx}" y="{cy}" font-family="sans-serif" font-size="{fs}" fill="#ffffff" fill-opacity="0.5" text-anchor="middle" dominant-baseline="central">{label}</text>
</svg>"##,
        cx = c.x,
        cy = c.y,
        r = style.radius,
        dash = style.dash,
        fs = style.font_size,
        label = escape_xml(&style.label),
    ))
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn build_fontdb(font_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = font_dir {
        load_fonts_from_dir(&mut db, dir);
    }
    tracing::debug!(faces = db.len(), "overlay font database ready");
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping font");
        }
    }
}

fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> IconRingResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| IconRingError::render("failed to allocate overlay pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
