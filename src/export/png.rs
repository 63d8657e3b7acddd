use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{IconRingError, IconRingResult},
    foundation::math::unpremultiply_rgba8_in_place,
    render::FrameRGBA,
};

/// File name used when a download has no explicit destination.
pub const DEFAULT_FILE_NAME: &str = "iriam-icon-ring.png";

/// Encode a frame as a straight-alpha RGBA8 PNG.
pub fn encode_png(frame: &FrameRGBA) -> IconRingResult<Vec<u8>> {
    let img = to_straight_image(frame)?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Encode `frame` and write it to `path`, creating parent directories as needed.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn write_png(frame: &FrameRGBA, path: &Path) -> IconRingResult<()> {
    let bytes = encode_png(frame)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, &bytes).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote png");
    Ok(())
}

fn to_straight_image(frame: &FrameRGBA) -> IconRingResult<image::RgbaImage> {
    let mut straight = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut straight);
    }
    image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| IconRingError::render("invalid rgba buffer size"))
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
