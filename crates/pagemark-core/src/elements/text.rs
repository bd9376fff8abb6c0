//! Text element style.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Horizontal text alignment within the element frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Style sub-schema for text elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in canvas units.
    pub font_size: f64,
    /// Font family name, resolved by the host renderer.
    pub font_family: String,
    pub color: SerializableColor,
    pub bold: bool,
    #[serde(default)]
    pub align: TextAlign,
}

impl TextStyle {
    /// Default font size (matches the default text element height comfortably).
    pub const DEFAULT_FONT_SIZE: f64 = 14.0;

    /// Clamp style values into their valid ranges.
    pub fn sanitize(&mut self) {
        if !self.font_size.is_finite() || self.font_size < 1.0 {
            self.font_size = Self::DEFAULT_FONT_SIZE;
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: "Inter".to_string(),
            color: SerializableColor::black(),
            bold: false,
            align: TextAlign::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_font_size() {
        let mut style = TextStyle {
            font_size: f64::NAN,
            ..TextStyle::default()
        };
        style.sanitize();
        assert!((style.font_size - TextStyle::DEFAULT_FONT_SIZE).abs() < f64::EPSILON);

        style.font_size = 0.0;
        style.sanitize();
        assert!((style.font_size - TextStyle::DEFAULT_FONT_SIZE).abs() < f64::EPSILON);
    }
}
