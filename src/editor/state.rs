use std::path::{Path, PathBuf};

use crate::{
    assets::{
        SourceImage,
        decode::{decode_image, load_image},
    },
    editor::prompt::{NO_IMAGE_ALERT, Prompt, RESET_CONFIRM},
    editor::settings::EditorSettings,
    export::png::{encode_png, write_png},
    foundation::core::{Canvas, Degrees},
    foundation::error::IconRingResult,
    geometry::{
        fit::Placement,
        ring::{RingGeometry, inner_radius_for},
    },
    render::{
        BackendKind, FrameRGBA, RenderBackend, create_backend,
        overlay::OverlayGuide,
        scene::{ImageLayer, Layer, Scene},
    },
};

/// Serializable view of the editor controls.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EditorSnapshot {
    /// Source size of the uploaded image, if any.
    pub image_size: Option<(u32, u32)>,
    /// Size slider value.
    pub size_px: f64,
    /// Thickness slider value.
    pub thickness_pct: f64,
    /// Current outer radius of the ring.
    pub outer_radius: f64,
    /// Current inner radius of the ring.
    pub inner_radius: f64,
    /// Image rotation in degrees.
    pub rotation_deg: f64,
    /// Whether the overlay guide is shown.
    pub overlay_visible: bool,
}

struct Upload {
    image: SourceImage,
    placement: Placement,
}

/// The icon editor: one canvas, at most one image, a ring mask and an optional guide.
///
/// Each control handler mutates a single piece of state. The mask is derived from the radii on
/// every render and never stored.
pub struct Editor {
    canvas: Canvas,
    settings: EditorSettings,
    backend: Box<dyn RenderBackend>,

    upload: Option<Upload>,
    size_px: f64,
    thickness_pct: f64,
    outer_radius: f64,
    inner_radius: f64,
    rotation: Degrees,

    overlay: Option<OverlayGuide>,
    overlay_visible: bool,
}

impl Editor {
    /// Editor on the 512x512 icon canvas with the CPU renderer.
    pub fn new(settings: EditorSettings) -> IconRingResult<Self> {
        let backend = create_backend(BackendKind::Cpu, Canvas::ICON)?;
        Self::with_backend(settings, backend)
    }

    /// Editor rendering through a caller-supplied backend.
    pub fn with_backend(
        settings: EditorSettings,
        backend: Box<dyn RenderBackend>,
    ) -> IconRingResult<Self> {
        settings.validate()?;
        let mut editor = Self {
            canvas: Canvas::ICON,
            backend,
            upload: None,
            size_px: 0.0,
            thickness_pct: 0.0,
            outer_radius: 0.0,
            inner_radius: 0.0,
            rotation: Degrees::ZERO,
            overlay: None,
            overlay_visible: false,
            settings,
        };
        editor.thickness_pct = editor.settings.thickness_pct;
        editor.set_size(editor.settings.size_px);
        if editor.settings.overlay {
            editor.toggle_overlay()?;
        }
        Ok(editor)
    }

    /// Target canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Whether an image is loaded.
    pub fn has_image(&self) -> bool {
        self.upload.is_some()
    }

    /// The uploaded image, if any.
    pub fn image(&self) -> Option<&SourceImage> {
        self.upload.as_ref().map(|u| &u.image)
    }

    /// Current image rotation.
    pub fn rotation(&self) -> Degrees {
        self.rotation
    }

    /// Current outer radius.
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Current inner radius.
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Whether the overlay guide is part of the canvas.
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Whether the overlay guide has been built at least once.
    pub fn overlay_created(&self) -> bool {
        self.overlay.is_some()
    }

    /// The ring mask for the current radii.
    pub fn ring(&self) -> RingGeometry {
        RingGeometry::new(self.canvas.center(), self.outer_radius, self.inner_radius)
    }

    /// Thickness slider: `inner = outer * (1 - t/100)`, with `t` clamped to `0..=100`.
    pub fn set_thickness(&mut self, thickness_pct: f64) {
        self.thickness_pct = clamp_or(thickness_pct, 0.0, 100.0, self.thickness_pct);
        self.inner_radius = inner_radius_for(self.outer_radius, self.thickness_pct);
        tracing::debug!(
            thickness_pct = self.thickness_pct,
            inner_radius = self.inner_radius,
            "thickness changed"
        );
    }

    /// Size slider: `outer = size / 2`, then the inner radius keeps the current thickness ratio.
    pub fn set_size(&mut self, size_px: f64) {
        self.size_px = clamp_or(size_px, 0.0, self.canvas.max_radius() * 2.0, self.size_px);
        self.outer_radius = self.size_px / 2.0;
        self.inner_radius = inner_radius_for(self.outer_radius, self.thickness_pct);
        tracing::debug!(
            size_px = self.size_px,
            outer_radius = self.outer_radius,
            inner_radius = self.inner_radius,
            "size changed"
        );
    }

    /// Rotation slider. Ignored while no image is loaded; returns whether it was applied.
    pub fn set_rotation(&mut self, deg: f64) -> IconRingResult<bool> {
        let Some(upload) = self.upload.as_mut() else {
            tracing::debug!(deg, "rotation ignored without an image");
            return Ok(false);
        };
        self.rotation = Degrees::new(deg)?;
        upload.placement = upload.placement.with_rotation(self.rotation);
        tracing::debug!(rotation = self.rotation.get(), "rotation changed");
        Ok(true)
    }

    /// Put `image` on the canvas, centered and cover-scaled, replacing any previous upload.
    ///
    /// The new image starts unrotated.
    pub fn upload(&mut self, image: SourceImage) {
        let placement = Placement::cover(image.width, image.height, self.canvas);
        self.rotation = Degrees::ZERO;
        tracing::debug!(
            width = image.width,
            height = image.height,
            scale = placement.scale,
            replaced = self.upload.is_some(),
            "image uploaded"
        );
        self.upload = Some(Upload { image, placement });
    }

    /// Decode and upload encoded image bytes. On failure the canvas is left untouched.
    pub fn upload_bytes(&mut self, bytes: &[u8]) -> IconRingResult<()> {
        let image = decode_image(bytes)?;
        self.upload(image);
        Ok(())
    }

    /// Read, decode and upload an image file. On failure the canvas is left untouched.
    pub fn upload_path(&mut self, path: &Path) -> IconRingResult<()> {
        let image = load_image(path)?;
        self.upload(image);
        Ok(())
    }

    /// Show or hide the guide; the guide is built on first show and reused afterwards.
    ///
    /// Returns the new visibility.
    pub fn toggle_overlay(&mut self) -> IconRingResult<bool> {
        if !self.overlay_visible && self.overlay.is_none() {
            let font_dir = self.settings.resolved_font_dir();
            let guide = OverlayGuide::build(
                self.canvas,
                &self.settings.overlay_style,
                font_dir.as_deref(),
            )?;
            self.overlay = Some(guide);
        }
        self.overlay_visible = !self.overlay_visible;
        tracing::debug!(visible = self.overlay_visible, "overlay toggled");
        Ok(self.overlay_visible)
    }

    /// Set overlay visibility, toggling only when it differs.
    pub fn set_overlay(&mut self, visible: bool) -> IconRingResult<bool> {
        if self.overlay_visible != visible {
            self.toggle_overlay()?;
        }
        Ok(self.overlay_visible)
    }

    /// Discard the image and restore rotation to zero after the user confirms.
    ///
    /// Does nothing (and asks nothing) without an image. Returns whether the image was removed.
    pub fn reset(&mut self, prompt: &mut dyn Prompt) -> bool {
        if self.upload.is_none() {
            return false;
        }
        if !prompt.confirm(RESET_CONFIRM) {
            tracing::debug!("reset declined");
            return false;
        }
        self.upload = None;
        self.rotation = Degrees::ZERO;
        tracing::debug!("image removed");
        true
    }

    /// Canvas contents, back to front.
    pub fn scene(&self) -> Scene {
        let mut layers = Vec::with_capacity(2);
        if let Some(upload) = &self.upload {
            layers.push(Layer::Image(ImageLayer {
                image: upload.image.clone(),
                placement: upload.placement,
                ring: self.ring(),
            }));
        }
        if self.overlay_visible
            && let Some(guide) = &self.overlay
        {
            layers.push(Layer::Overlay(guide.clone()));
        }
        Scene {
            canvas: self.canvas,
            layers,
        }
    }

    /// Render the canvas as currently shown, overlay included when visible.
    pub fn render(&mut self) -> IconRingResult<FrameRGBA> {
        let scene = self.scene();
        self.backend.render_scene(&scene)
    }

    /// Render the canvas with the overlay temporarily hidden.
    ///
    /// Alerts and returns `None` when no image is loaded.
    pub fn export_frame(&mut self, prompt: &mut dyn Prompt) -> IconRingResult<Option<FrameRGBA>> {
        if self.upload.is_none() {
            tracing::warn!("download attempted without an image");
            prompt.alert(NO_IMAGE_ALERT);
            return Ok(None);
        }

        let was_visible = self.overlay_visible;
        self.overlay_visible = false;
        let frame = self.render();
        self.overlay_visible = was_visible;
        frame.map(Some)
    }

    /// Export the canvas as PNG bytes, or `None` after alerting when no image is loaded.
    pub fn download_bytes(&mut self, prompt: &mut dyn Prompt) -> IconRingResult<Option<Vec<u8>>> {
        match self.export_frame(prompt)? {
            Some(frame) => Ok(Some(encode_png(&frame)?)),
            None => Ok(None),
        }
    }

    /// Export the canvas to a PNG file at `path`.
    ///
    /// Without an image the user is alerted and no file is written.
    pub fn download(
        &mut self,
        prompt: &mut dyn Prompt,
        path: &Path,
    ) -> IconRingResult<Option<PathBuf>> {
        let Some(frame) = self.export_frame(prompt)? else {
            return Ok(None);
        };
        write_png(&frame, path)?;
        Ok(Some(path.to_path_buf()))
    }

    /// Current control values.
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            image_size: self.image().map(|img| (img.width, img.height)),
            size_px: self.size_px,
            thickness_pct: self.thickness_pct,
            outer_radius: self.outer_radius,
            inner_radius: self.inner_radius,
            rotation_deg: self.rotation.get(),
            overlay_visible: self.overlay_visible,
        }
    }
}

fn clamp_or(v: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if v.is_finite() { v.clamp(lo, hi) } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/state.rs"]
mod tests;
