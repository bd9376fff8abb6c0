//! Progress bar element style.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Style sub-schema for progress bar elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStyle {
    /// Fill fraction in percent, always within 0..=100.
    pub progress: f64,
    pub track_color: SerializableColor,
    pub fill_color: SerializableColor,
    #[serde(default)]
    pub corner_radius: f64,
}

impl ProgressStyle {
    pub fn sanitize(&mut self) {
        self.progress = if self.progress.is_finite() {
            self.progress.clamp(0.0, 100.0)
        } else {
            0.0
        };
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            self.corner_radius = 0.0;
        }
    }
}

impl Default for ProgressStyle {
    fn default() -> Self {
        Self {
            progress: 50.0,
            track_color: SerializableColor::new(229, 231, 235, 255),
            fill_color: SerializableColor::new(59, 130, 246, 255),
            corner_radius: 4.0,
        }
    }
}
