//! Shape element style.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Geometric form of a shape element, drawn to fill its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeForm {
    #[default]
    Rectangle,
    Ellipse,
}

/// Style sub-schema for shape elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub form: ShapeForm,
    /// Fill color (None = outline only).
    pub fill_color: Option<SerializableColor>,
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    /// Corner radius for rectangles (ignored for ellipses).
    #[serde(default)]
    pub corner_radius: f64,
}

impl ShapeStyle {
    pub fn sanitize(&mut self) {
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            self.stroke_width = 1.0;
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            self.corner_radius = 0.0;
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            form: ShapeForm::default(),
            fill_color: Some(SerializableColor::new(229, 231, 235, 255)),
            stroke_color: SerializableColor::black(),
            stroke_width: 1.0,
            corner_radius: 0.0,
        }
    }
}
