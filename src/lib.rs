//! iconring masks an image into a ring-shaped icon frame.
//!
//! An [`Editor`] holds one canvas: at most one uploaded image, a ring (donut) mask defined by
//! two concentric radii, an image rotation and an optional overlay guide. Control handlers
//! mutate that state; rendering derives the mask from the radii and produces a premultiplied
//! [`FrameRGBA`], which [`encode_png`] turns into a 512x512 transparent PNG.
//!
//! # Pipeline overview
//!
//! 1. **Upload**: bytes -> [`SourceImage`] (premultiplied RGBA8), cover-fit onto the canvas
//! 2. **Scene**: [`Editor::scene`] lists the visible layers, back to front
//! 3. **Render**: [`RenderBackend::render_scene`] paints the image, multiplies it by the ring
//!    mask and composites the overlay guide when shown
//! 4. **Export**: [`Editor::download`] hides the guide, renders and writes the PNG
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod editor;
mod export;
mod foundation;
mod geometry;
mod render;

/// Replay of editor control events from a text script.
pub mod script;

pub use assets::SourceImage;
pub use assets::decode::{decode_image, load_image};
pub use editor::prompt::{AutoPrompt, NO_IMAGE_ALERT, Prompt, RESET_CONFIRM, TerminalPrompt};
pub use editor::settings::{EditorSettings, FONT_DIR_ENV};
pub use editor::state::{Editor, EditorSnapshot};
pub use export::png::{DEFAULT_FILE_NAME, encode_png, write_png};
pub use foundation::core::{Affine, BezPath, Canvas, Degrees, Point, Rect, Vec2};
pub use foundation::error::{IconRingError, IconRingResult};
pub use geometry::fit::{Placement, cover_scale};
pub use geometry::ring::{MAX_OUTER_RADIUS, RingGeometry, inner_radius_for};
pub use render::cpu::CpuRenderer;
pub use render::overlay::{OverlayGuide, OverlayStyle};
pub use render::scene::{ImageLayer, Layer, LayerKind, Scene};
pub use render::{BackendKind, FrameRGBA, RenderBackend, create_backend};
