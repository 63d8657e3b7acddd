use crate::{
    assets::SourceImage,
    foundation::core::Canvas,
    geometry::{fit::Placement, ring::RingGeometry},
    render::overlay::OverlayGuide,
};

/// The uploaded image as drawn: placed on the canvas and clipped to the ring.
#[derive(Clone, Debug)]
pub struct ImageLayer {
    /// Decoded source pixels.
    pub image: SourceImage,
    /// Cover-fit placement and rotation.
    pub placement: Placement,
    /// Clip region applied to the image.
    pub ring: RingGeometry,
}

/// One object on the canvas.
#[derive(Clone, Debug)]
pub enum Layer {
    /// The masked upload.
    Image(ImageLayer),
    /// The editing guide. Never part of an export.
    Overlay(OverlayGuide),
}

/// Discriminant of a [`Layer`], handy for comparing canvas contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    /// [`Layer::Image`].
    Image,
    /// [`Layer::Overlay`].
    Overlay,
}

impl Layer {
    /// Kind of this layer.
    pub fn kind(&self) -> LayerKind {
        match self {
            Layer::Image(_) => LayerKind::Image,
            Layer::Overlay(_) => LayerKind::Overlay,
        }
    }
}

/// Ordered canvas contents, back to front.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Target canvas.
    pub canvas: Canvas,
    /// Layers, back to front.
    pub layers: Vec<Layer>,
}

impl Scene {
    /// Kinds of all layers, back to front.
    pub fn layer_kinds(&self) -> Vec<LayerKind> {
        self.layers.iter().map(Layer::kind).collect()
    }

    /// Whether nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
