//! Text measurement seam.
//!
//! Layout never asks a rendering backend for text metrics directly; it goes
//! through `TextMeasurer` so hosts can plug in real font shaping and tests can
//! inject fixed sizes.

use serde::{Deserialize, Serialize};

/// Rendered bounding-box size of a single line of text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

impl TextExtent {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextExtent;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font_size_px: f64) -> TextExtent {
        (**self).measure(text, font_size_px)
    }
}

/// Deterministic, backend-independent estimate from per-glyph-class widths.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextExtent {
        if text.is_empty() {
            return TextExtent::new(0.0, font_size_px);
        }
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | ':' | ';' | 'i' | 'l' | 'j' | '|' | '\'' => 0.34,
                '-' | '+' | '%' | '$' => 0.42,
                ' ' => 0.33,
                'm' | 'w' | 'M' | 'W' => 0.86,
                'A'..='Z' => 0.68,
                _ => 0.56,
            }
        });
        TextExtent::new(units * font_size_px, font_size_px)
    }
}
