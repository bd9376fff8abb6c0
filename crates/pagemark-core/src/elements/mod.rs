//! Element definitions for the page canvas.

mod icon;
mod line;
mod progress;
mod shape;
mod text;

pub use icon::IconStyle;
pub use line::LineStyle;
pub use progress::ProgressStyle;
pub use shape::{ShapeForm, ShapeStyle};
pub use text::{TextAlign, TextStyle};

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum element width in canvas units, enforced after every mutation.
pub const MIN_ELEMENT_WIDTH: f64 = 30.0;
/// Minimum element height in canvas units, enforced after every mutation.
pub const MIN_ELEMENT_HEIGHT: f64 = 20.0;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Axis-aligned placement of an element on the canvas: top-left origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a frame from a kurbo rect.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    /// Get the frame as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Translate by a delta, keeping the extent.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Check whether all components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.as_rect().contains(point)
    }
}

/// Per-variant payload and style for an element.
///
/// A closed tag set: each variant has a distinct render and a distinct style
/// sub-schema. Runtime extension is deliberately not supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Text {
        content: String,
        style: TextStyle,
    },
    Shape {
        style: ShapeStyle,
    },
    Line {
        style: LineStyle,
    },
    Icon {
        name: String,
        style: IconStyle,
    },
    ProgressBar {
        style: ProgressStyle,
    },
}

impl ElementKind {
    /// Stable tag name for logging and serialization diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Text { .. } => "text",
            ElementKind::Shape { .. } => "shape",
            ElementKind::Line { .. } => "line",
            ElementKind::Icon { .. } => "icon",
            ElementKind::ProgressBar { .. } => "progressBar",
        }
    }

    /// Clamp variant style values into their valid ranges.
    pub fn sanitize(&mut self) {
        match self {
            ElementKind::Text { style, .. } => style.sanitize(),
            ElementKind::Shape { style } => style.sanitize(),
            ElementKind::Line { style } => style.sanitize(),
            ElementKind::Icon { style, .. } => style.sanitize(),
            ElementKind::ProgressBar { style } => style.sanitize(),
        }
    }
}

/// One placed visual object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    /// Placement on the canvas (top-left origin, canvas units).
    pub frame: Frame,
    /// Paint order: higher paints later (on top). Not required to be unique.
    pub z_index: i32,
    /// Variant payload and style.
    pub kind: ElementKind,
}

impl Element {
    /// Create a new element with a fresh id.
    pub fn new(frame: Frame, kind: ElementKind) -> Self {
        let mut kind = kind;
        kind.sanitize();
        Self {
            id: Uuid::new_v4(),
            frame,
            z_index: 0,
            kind,
        }
    }

    /// Set the paint order, builder style.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn bounds(&self) -> Rect {
        self.frame.as_rect()
    }

    /// Check if a point (in canvas units) hits this element.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    /// Get the text content, if this is a text element.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Get the icon name, if this is an icon element.
    pub fn icon_name(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Icon { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Convenience constructor for a text element.
    pub fn text(frame: Frame, content: impl Into<String>) -> Self {
        Self::new(
            frame,
            ElementKind::Text {
                content: content.into(),
                style: TextStyle::default(),
            },
        )
    }

    /// Convenience constructor for a shape element.
    pub fn shape(frame: Frame, form: ShapeForm) -> Self {
        Self::new(
            frame,
            ElementKind::Shape {
                style: ShapeStyle {
                    form,
                    ..ShapeStyle::default()
                },
            },
        )
    }

    /// Convenience constructor for a line element.
    pub fn line(frame: Frame) -> Self {
        Self::new(
            frame,
            ElementKind::Line {
                style: LineStyle::default(),
            },
        )
    }

    /// Convenience constructor for an icon element.
    pub fn icon(frame: Frame, name: impl Into<String>) -> Self {
        Self::new(
            frame,
            ElementKind::Icon {
                name: name.into(),
                style: IconStyle::default(),
            },
        )
    }

    /// Convenience constructor for a progress bar element.
    pub fn progress_bar(frame: Frame, progress: f64) -> Self {
        Self::new(
            frame,
            ElementKind::ProgressBar {
                style: ProgressStyle {
                    progress,
                    ..ProgressStyle::default()
                },
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rect_roundtrip() {
        let frame = Frame::new(10.0, 20.0, 100.0, 50.0);
        let rect = frame.as_rect();
        assert_eq!(rect, Rect::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(Frame::from_rect(rect), frame);
    }

    #[test]
    fn test_frame_edges() {
        let frame = Frame::new(10.0, 20.0, 100.0, 50.0);
        assert!((frame.right() - 110.0).abs() < f64::EPSILON);
        assert!((frame.bottom() - 70.0).abs() < f64::EPSILON);
        assert_eq!(frame.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_frame_finite() {
        assert!(Frame::new(0.0, 0.0, 30.0, 20.0).is_finite());
        assert!(!Frame::new(f64::NAN, 0.0, 30.0, 20.0).is_finite());
        assert!(!Frame::new(0.0, 0.0, f64::INFINITY, 20.0).is_finite());
    }

    #[test]
    fn test_progress_sanitized_on_creation() {
        let bar = Element::progress_bar(Frame::new(0.0, 0.0, 200.0, 20.0), 140.0);
        match bar.kind {
            ElementKind::ProgressBar { style } => {
                assert!((style.progress - 100.0).abs() < f64::EPSILON)
            }
            _ => panic!("expected progress bar"),
        }
    }

    #[test]
    fn test_kind_names() {
        let frame = Frame::new(0.0, 0.0, 100.0, 40.0);
        assert_eq!(Element::text(frame, "hi").kind.name(), "text");
        assert_eq!(Element::line(frame).kind.name(), "line");
        assert_eq!(Element::icon(frame, "mail").kind.name(), "icon");
        assert_eq!(Element::progress_bar(frame, 50.0).kind.name(), "progressBar");
    }

    #[test]
    fn test_hit_test_tolerance() {
        let elem = Element::shape(Frame::new(100.0, 100.0, 50.0, 50.0), ShapeForm::Rectangle);
        assert!(elem.hit_test(Point::new(125.0, 125.0), 0.0));
        assert!(!elem.hit_test(Point::new(99.0, 99.0), 0.0));
        assert!(elem.hit_test(Point::new(99.0, 99.0), 2.0));
    }
}
