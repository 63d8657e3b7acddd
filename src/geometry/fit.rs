use crate::foundation::core::{Affine, Canvas, Degrees, Vec2};

/// Uniform scale that makes a `width x height` image fully cover `canvas`.
///
/// Returns `0.0` for empty images.
pub fn cover_scale(width: u32, height: u32, canvas: Canvas) -> f64 {
    if width == 0 || height == 0 {
        return 0.0;
    }
    let sx = f64::from(canvas.width) / f64::from(width);
    let sy = f64::from(canvas.height) / f64::from(height);
    sx.max(sy)
}

/// Where an uploaded image sits on the canvas: centered, cover-scaled and rotated about its
/// own center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Source image width in pixels.
    pub width: u32,
    /// Source image height in pixels.
    pub height: u32,
    /// Uniform scale applied to the source pixels.
    pub scale: f64,
    /// Clockwise rotation in y-down canvas space.
    pub rotation: Degrees,
}

impl Placement {
    /// Cover-fit placement of an image on `canvas` with no rotation.
    pub fn cover(width: u32, height: u32, canvas: Canvas) -> Self {
        Self {
            width,
            height,
            scale: cover_scale(width, height, canvas),
            rotation: Degrees::ZERO,
        }
    }

    /// Same placement with a different rotation.
    pub fn with_rotation(mut self, rotation: Degrees) -> Self {
        self.rotation = rotation;
        self
    }

    /// Map from source pixel space to canvas space.
    pub fn transform(&self, canvas: Canvas) -> Affine {
        let half = Vec2::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0);
        Affine::translate(canvas.center().to_vec2())
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-half)
    }

    /// Size of the scaled image before rotation.
    pub fn scaled_size(&self) -> (f64, f64) {
        (
            f64::from(self.width) * self.scale,
            f64::from(self.height) * self.scale,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
