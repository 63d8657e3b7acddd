use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::error::{IconRingError, IconRingResult},
    geometry::ring::MAX_OUTER_RADIUS,
    render::overlay::OverlayStyle,
};

/// Environment variable consulted when no font directory is configured.
pub const FONT_DIR_ENV: &str = "ICONRING_FONT_DIR";

/// Initial control values and overlay look for an editor session.
///
/// Loaded from JSON; every key is optional and unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorSettings {
    /// Ring diameter in pixels (size slider).
    pub size_px: f64,
    /// Ring thickness in percent of the outer radius (thickness slider).
    pub thickness_pct: f64,
    /// Image rotation in degrees. The CLI applies it right after uploading the image.
    pub rotation_deg: f64,
    /// Start with the overlay guide visible.
    pub overlay: bool,
    /// Look of the overlay guide.
    pub overlay_style: OverlayStyle,
    /// Extra fonts for the overlay label.
    pub font_dir: Option<PathBuf>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            size_px: MAX_OUTER_RADIUS * 2.0,
            thickness_pct: 50.0,
            rotation_deg: 0.0,
            overlay: false,
            overlay_style: OverlayStyle::default(),
            font_dir: None,
        }
    }
}

impl EditorSettings {
    /// Parse settings JSON from a reader and validate it.
    pub fn from_reader<R: Read>(r: R) -> IconRingResult<Self> {
        let settings: Self = serde_json::from_reader(r).context("parse settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings JSON from `path` and validate it.
    pub fn from_path(path: &Path) -> IconRingResult<Self> {
        let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values no slider could produce.
    pub fn validate(&self) -> IconRingResult<()> {
        for (name, v) in [
            ("size_px", self.size_px),
            ("thickness_pct", self.thickness_pct),
            ("rotation_deg", self.rotation_deg),
        ] {
            if !v.is_finite() {
                return Err(IconRingError::validation(format!("{name} must be finite")));
            }
        }
        if self.size_px < 0.0 {
            return Err(IconRingError::validation("size_px must be >= 0"));
        }
        if !(0.0..=100.0).contains(&self.thickness_pct) {
            return Err(IconRingError::validation(
                "thickness_pct must be within 0..=100",
            ));
        }
        Ok(())
    }

    /// Configured font directory, falling back to `ICONRING_FONT_DIR`.
    pub fn resolved_font_dir(&self) -> Option<PathBuf> {
        self.font_dir
            .clone()
            .or_else(|| std::env::var_os(FONT_DIR_ENV).map(PathBuf::from))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/settings.rs"]
mod tests;
