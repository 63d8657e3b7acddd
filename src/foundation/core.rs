use crate::foundation::error::{IconRingError, IconRingResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The fixed icon canvas every editor frame is rendered and exported at.
    pub const ICON: Canvas = Canvas {
        width: 512,
        height: 512,
    };

    /// Create a validated canvas. Both sides must fit the rasterizer's `u16` surfaces.
    pub fn new(width: u32, height: u32) -> IconRingResult<Self> {
        if width == 0 || height == 0 {
            return Err(IconRingError::validation("canvas must be non-empty"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(IconRingError::validation(format!(
                "canvas {width}x{height} exceeds {max}x{max}",
                max = u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Canvas center in pixel space.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Largest circle radius that still fits inside the canvas.
    pub const fn max_radius(self) -> f64 {
        let side = if self.width < self.height {
            self.width
        } else {
            self.height
        };
        side as f64 / 2.0
    }

    /// Byte length of a tightly packed RGBA8 buffer for this canvas.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Rotation angle in degrees, always normalized into `[0, 360)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Degrees(f64);

impl Degrees {
    /// No rotation.
    pub const ZERO: Degrees = Degrees(0.0);

    /// Normalize any finite angle into `[0, 360)`.
    pub fn new(deg: f64) -> IconRingResult<Self> {
        if !deg.is_finite() {
            return Err(IconRingError::validation("rotation must be finite"));
        }
        let mut d = deg.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if d >= 360.0 {
            d = 0.0;
        }
        Ok(Self(d))
    }

    /// Angle in degrees.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Angle in radians.
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl TryFrom<f64> for Degrees {
    type Error = IconRingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Degrees> for f64 {
    fn from(value: Degrees) -> Self {
        value.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
