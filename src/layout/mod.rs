//! # Text Layout
//!
//! Font descriptions, the measurement seam, and the line-breaking and
//! vertical placement rules shared by every render target.

pub mod text;

pub use text::{LINE_HEIGHT_FACTOR, LineBlock, wrap};

use crate::design::FontWeight;

/// Everything needed to pick a face and size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Em size in nominal pixels.
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    pub fn new(family: &str, size: f32, weight: FontWeight) -> Self {
        Self {
            family: family.to_string(),
            size,
            weight,
        }
    }
}

/// Width of a run of text set in a given font, in nominal pixels.
pub trait TextMeasure {
    fn measure(&self, font: &FontSpec, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&FontSpec, &str) -> f32,
{
    fn measure(&self, font: &FontSpec, text: &str) -> f32 {
        self(font, text)
    }
}
