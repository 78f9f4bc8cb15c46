use crate::geometry::arc::{self, ArcSegment};
use crate::geometry::colormap::ColorFn;
use crate::geometry::frame::SpectrumFrame;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayerError {
    #[error("layer scale must be a non-negative number, got {0}")]
    InvalidScale(f64),
}

/// One independently colored and zoomed pass of the radial graph.
#[derive(Clone)]
pub struct Layer {
    color: ColorFn,
    scale: f64,
}

impl Layer {
    pub fn new(color: ColorFn, scale: f64) -> Result<Self, LayerError> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(LayerError::InvalidScale(scale));
        }
        Ok(Self { color, scale })
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer").field("scale", &self.scale).finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerDrawing {
    /// Uniform zoom of the enclosing group.
    pub scale_factor: f64,
    pub intensity: f64,
    pub segments: Vec<ArcSegment>,
}

/// Drawing instructions for one frame, bottom layer first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub layers: Vec<LayerDrawing>,
}

impl Scene {
    pub fn segment_count(&self) -> usize {
        self.layers.iter().map(|l| l.segments.len()).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayeredRenderer {
    layers: Vec<Layer>,
}

impl LayeredRenderer {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Runs every layer over the same frame. Layers never see each other's
    /// output, and nothing from earlier frames is consulted.
    pub fn render(&self, frame: &SpectrumFrame) -> Scene {
        let layers = self
            .layers
            .iter()
            .map(|layer| {
                let geo = arc::build(frame, &*layer.color);
                LayerDrawing {
                    scale_factor: geo.intensity * layer.scale + 1.0,
                    intensity: geo.intensity,
                    segments: geo.segments,
                }
            })
            .collect();
        Scene { layers }
    }
}
