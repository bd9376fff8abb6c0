//! Icon element style.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Style sub-schema for icon elements.
///
/// The icon name on the element is a symbolic reference; the render layer
/// resolves it through an external glyph provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconStyle {
    pub color: SerializableColor,
    /// Glyph size in canvas units; the glyph is centered in the frame.
    pub size: f64,
}

impl IconStyle {
    pub fn sanitize(&mut self) {
        if !self.size.is_finite() || self.size < 4.0 {
            self.size = 16.0;
        }
    }
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            size: 16.0,
        }
    }
}
