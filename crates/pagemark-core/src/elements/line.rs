//! Line element style.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Style sub-schema for line elements.
///
/// A line is a horizontal rule drawn across the vertical middle of its frame;
/// the frame height only gives the user something to grab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: SerializableColor,
    /// Stroke thickness in canvas units.
    pub thickness: f64,
    #[serde(default)]
    pub dashed: bool,
}

impl LineStyle {
    pub fn sanitize(&mut self) {
        if !self.thickness.is_finite() || self.thickness < 0.5 {
            self.thickness = 1.0;
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::new(107, 114, 128, 255),
            thickness: 1.0,
            dashed: false,
        }
    }
}
