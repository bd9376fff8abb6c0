//! Renderer trait abstraction.

use kurbo::Size;
use pagemark_core::Editor;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid (plain background).
    None,
    /// Full grid lines.
    #[default]
    Lines,
    /// Only intersection dots.
    Dots,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::Dots,
            GridStyle::Dots => GridStyle::None,
        }
    }

    /// Get display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
            GridStyle::Dots => "Dots",
        }
    }
}

/// Context for a single render frame. Read-only over editor state.
pub struct RenderContext<'a> {
    /// The editor whose scene, selection and guides are drawn.
    pub editor: &'a Editor,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Grid display style.
    pub grid_style: GridStyle,
    /// Selection highlight color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    pub fn new(editor: &'a Editor, viewport_size: Size) -> Self {
        Self {
            editor,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            grid_style: GridStyle::Lines,
            selection_color: Color::from_rgba8(59, 130, 246, 255),
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    /// Set the selection highlight color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations walk the composed display list and translate it to their
/// drawing API.
pub trait Renderer {
    /// Build and submit the drawing commands for a frame.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_style_cycle() {
        let mut style = GridStyle::None;
        for _ in 0..3 {
            style = style.next();
        }
        assert_eq!(style, GridStyle::None);
        assert_eq!(GridStyle::Lines.name(), "Lines");
    }
}
