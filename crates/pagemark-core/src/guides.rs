//! Smart alignment guides, grid quantization and resize geometry.
//!
//! Everything in this module is a pure function over candidate geometry: the
//! interaction layer feeds it tentative frames on every pointer move and gets
//! back adjusted frames plus the guide lines that justify the adjustment.

use crate::elements::{Frame, MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH};
use crate::scene::CanvasSize;
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Default grid cell size in canvas units (matches the visual grid).
pub const GRID_SIZE: f64 = 10.0;

/// Distance threshold for smart guide snapping (in canvas units).
pub const SMART_GUIDE_THRESHOLD: f64 = 5.0;

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideOrientation {
    /// A vertical line at a fixed x position.
    Vertical,
    /// A horizontal line at a fixed y position.
    Horizontal,
}

/// What produced a guide, for visual treatment in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideKind {
    /// Edge or center of another element.
    ElementEdge,
    /// The canvas center (rendered dashed).
    CanvasCenter,
}

/// An ephemeral alignment line shown during a drag or resize.
///
/// Guides are recomputed on every pointer move and discarded on pointer up;
/// they never enter the scene model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmartGuide {
    pub orientation: GuideOrientation,
    /// Position along the perpendicular axis, in canvas units.
    pub position: f64,
    pub kind: GuideKind,
}

/// One of the 8 resize handles, named by its position on the selection frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl HandleKind {
    /// All handles, in overlay paint order.
    pub fn all() -> [HandleKind; 8] {
        [
            HandleKind::TopLeft,
            HandleKind::Top,
            HandleKind::TopRight,
            HandleKind::Right,
            HandleKind::BottomRight,
            HandleKind::Bottom,
            HandleKind::BottomLeft,
            HandleKind::Left,
        ]
    }

    /// Whether dragging this handle moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, HandleKind::TopLeft | HandleKind::BottomLeft | HandleKind::Left)
    }

    /// Whether dragging this handle moves the right edge.
    pub fn moves_right(self) -> bool {
        matches!(self, HandleKind::TopRight | HandleKind::BottomRight | HandleKind::Right)
    }

    /// Whether dragging this handle moves the top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, HandleKind::TopLeft | HandleKind::TopRight | HandleKind::Top)
    }

    /// Whether dragging this handle moves the bottom edge.
    pub fn moves_bottom(self) -> bool {
        matches!(self, HandleKind::BottomLeft | HandleKind::BottomRight | HandleKind::Bottom)
    }

    /// Position of this handle on a frame, in canvas units.
    pub fn position(self, frame: Frame) -> kurbo::Point {
        let center = frame.center();
        match self {
            HandleKind::TopLeft => kurbo::Point::new(frame.x, frame.y),
            HandleKind::Top => kurbo::Point::new(center.x, frame.y),
            HandleKind::TopRight => kurbo::Point::new(frame.right(), frame.y),
            HandleKind::Right => kurbo::Point::new(frame.right(), center.y),
            HandleKind::BottomRight => kurbo::Point::new(frame.right(), frame.bottom()),
            HandleKind::Bottom => kurbo::Point::new(center.x, frame.bottom()),
            HandleKind::BottomLeft => kurbo::Point::new(frame.x, frame.bottom()),
            HandleKind::Left => kurbo::Point::new(frame.x, center.y),
        }
    }
}

/// A single alignment target on one axis.
#[derive(Debug, Clone, Copy)]
struct AxisCandidate {
    position: f64,
    kind: GuideKind,
}

/// Result of a snap computation.
#[derive(Debug, Clone)]
pub struct GuideSnap {
    /// The adjusted frame (clamping not yet applied).
    pub frame: Frame,
    /// Guides that justify the adjustment, at most one per orientation.
    pub guides: Vec<SmartGuide>,
    pub snapped_x: bool,
    pub snapped_y: bool,
}

impl GuideSnap {
    /// A result with no snapping.
    pub fn none(frame: Frame) -> Self {
        Self {
            frame,
            guides: Vec::new(),
            snapped_x: false,
            snapped_y: false,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Collect vertical alignment targets (x positions) from the other elements
/// and the canvas center. The canvas-center candidate is appended last so an
/// exact distance tie resolves to an element edge.
fn vertical_candidates(others: &[Rect], canvas: CanvasSize) -> Vec<AxisCandidate> {
    let mut out = Vec::with_capacity(others.len() * 3 + 1);
    for rect in others {
        out.push(AxisCandidate { position: rect.x0, kind: GuideKind::ElementEdge });
        out.push(AxisCandidate { position: rect.center().x, kind: GuideKind::ElementEdge });
        out.push(AxisCandidate { position: rect.x1, kind: GuideKind::ElementEdge });
    }
    out.push(AxisCandidate {
        position: canvas.width / 2.0,
        kind: GuideKind::CanvasCenter,
    });
    out
}

/// Collect horizontal alignment targets (y positions); see [`vertical_candidates`].
fn horizontal_candidates(others: &[Rect], canvas: CanvasSize) -> Vec<AxisCandidate> {
    let mut out = Vec::with_capacity(others.len() * 3 + 1);
    for rect in others {
        out.push(AxisCandidate { position: rect.y0, kind: GuideKind::ElementEdge });
        out.push(AxisCandidate { position: rect.center().y, kind: GuideKind::ElementEdge });
        out.push(AxisCandidate { position: rect.y1, kind: GuideKind::ElementEdge });
    }
    out.push(AxisCandidate {
        position: canvas.height / 2.0,
        kind: GuideKind::CanvasCenter,
    });
    out
}

/// Pick the winning candidate on one axis: the nearest within threshold.
///
/// `edges` are the moving element's own positions on that axis. Ties resolve
/// by candidate list order, which places element edges before the canvas
/// center. Returns the offset that lands the matching edge exactly on the
/// candidate, plus the candidate itself.
fn best_axis_snap(
    edges: &[f64],
    candidates: &[AxisCandidate],
    threshold: f64,
) -> Option<(f64, AxisCandidate)> {
    let mut best: Option<(f64, AxisCandidate)> = None;
    let mut best_dist = f64::INFINITY;
    for candidate in candidates {
        for &edge in edges {
            let dist = (candidate.position - edge).abs();
            if dist <= threshold && dist < best_dist {
                best_dist = dist;
                best = Some((candidate.position - edge, *candidate));
            }
        }
    }
    best
}

/// Snap a dragged frame against the other elements and the canvas center.
///
/// The moving frame's left/center/right edges compete for one vertical
/// winner and its top/center/bottom edges for one horizontal winner; the two
/// axes adjust independently.
pub fn snap_drag(
    frame: Frame,
    others: &[Rect],
    canvas: CanvasSize,
    threshold: f64,
) -> GuideSnap {
    let x_edges = [frame.x, frame.center().x, frame.right()];
    let y_edges = [frame.y, frame.center().y, frame.bottom()];

    let mut result = GuideSnap::none(frame);

    if let Some((offset, candidate)) =
        best_axis_snap(&x_edges, &vertical_candidates(others, canvas), threshold)
    {
        result.frame.x += offset;
        result.snapped_x = true;
        result.guides.push(SmartGuide {
            orientation: GuideOrientation::Vertical,
            position: candidate.position,
            kind: candidate.kind,
        });
    }

    if let Some((offset, candidate)) =
        best_axis_snap(&y_edges, &horizontal_candidates(others, canvas), threshold)
    {
        result.frame.y += offset;
        result.snapped_y = true;
        result.guides.push(SmartGuide {
            orientation: GuideOrientation::Horizontal,
            position: candidate.position,
            kind: candidate.kind,
        });
    }

    result
}

/// Snap a resized frame: only the edges the handle moves participate, and
/// the snap adjusts that edge while the opposite edge stays fixed.
pub fn snap_resize(
    frame: Frame,
    handle: HandleKind,
    others: &[Rect],
    canvas: CanvasSize,
    threshold: f64,
) -> GuideSnap {
    let mut result = GuideSnap::none(frame);

    let x_edge = if handle.moves_left() {
        Some(frame.x)
    } else if handle.moves_right() {
        Some(frame.right())
    } else {
        None
    };
    if let Some(edge) = x_edge {
        if let Some((offset, candidate)) =
            best_axis_snap(&[edge], &vertical_candidates(others, canvas), threshold)
        {
            if handle.moves_left() {
                result.frame.x += offset;
                result.frame.width -= offset;
            } else {
                result.frame.width += offset;
            }
            result.snapped_x = true;
            result.guides.push(SmartGuide {
                orientation: GuideOrientation::Vertical,
                position: candidate.position,
                kind: candidate.kind,
            });
        }
    }

    let y_edge = if handle.moves_top() {
        Some(frame.y)
    } else if handle.moves_bottom() {
        Some(frame.bottom())
    } else {
        None
    };
    if let Some(edge) = y_edge {
        if let Some((offset, candidate)) =
            best_axis_snap(&[edge], &horizontal_candidates(others, canvas), threshold)
        {
            if handle.moves_top() {
                result.frame.y += offset;
                result.frame.height -= offset;
            } else {
                result.frame.height += offset;
            }
            result.snapped_y = true;
            result.guides.push(SmartGuide {
                orientation: GuideOrientation::Horizontal,
                position: candidate.position,
                kind: candidate.kind,
            });
        }
    }

    result
}

/// Round a frame to the grid. During a resize the extent quantizes too.
/// Grid quantization and smart snapping are mutually exclusive per gesture.
pub fn quantize_frame(frame: Frame, grid: f64, resize: bool) -> Frame {
    if grid <= 0.0 || !grid.is_finite() {
        return frame;
    }
    let round = |v: f64| (v / grid).round() * grid;
    let mut out = frame;
    out.x = round(frame.x);
    out.y = round(frame.y);
    if resize {
        out.width = round(frame.width);
        out.height = round(frame.height);
    }
    out
}

/// Apply a resize-handle drag to a frame.
///
/// Each handle moves only the edges its compass letters imply; when a
/// dimension would shrink below the minimum it pins at the minimum with the
/// opposite edge fixed, so the frame shrinks from the correct side and never
/// flips.
pub fn apply_resize(frame: Frame, handle: HandleKind, delta: Vec2) -> Frame {
    let mut x0 = frame.x;
    let mut y0 = frame.y;
    let mut x1 = frame.right();
    let mut y1 = frame.bottom();

    if handle.moves_left() {
        x0 = (x0 + delta.x).min(x1 - MIN_ELEMENT_WIDTH);
    }
    if handle.moves_right() {
        x1 = (x1 + delta.x).max(x0 + MIN_ELEMENT_WIDTH);
    }
    if handle.moves_top() {
        y0 = (y0 + delta.y).min(y1 - MIN_ELEMENT_HEIGHT);
    }
    if handle.moves_bottom() {
        y1 = (y1 + delta.y).max(y0 + MIN_ELEMENT_HEIGHT);
    }

    Frame::new(x0, y0, x1 - x0, y1 - y0)
}

/// Clamp a whole-frame move into the canvas. Size is preserved where
/// possible (capped at the canvas itself), then the origin is clamped so the
/// frame stays fully inside. Applied last; overrides any snap result.
pub fn clamp_drag(frame: Frame, canvas: CanvasSize) -> Frame {
    let width = frame.width.max(MIN_ELEMENT_WIDTH).min(canvas.width);
    let height = frame.height.max(MIN_ELEMENT_HEIGHT).min(canvas.height);
    let x = frame.x.clamp(0.0, (canvas.width - width).max(0.0));
    let y = frame.y.clamp(0.0, (canvas.height - height).max(0.0));
    Frame::new(x, y, width, height)
}

/// Clamp a resize into the canvas without disturbing the anchored edges:
/// only edges the handle moves are pulled back inside, and minimum size is
/// re-enforced against the fixed edge.
///
/// The min/max order matters: a coarse grid can hand in a frame collapsed
/// below the minimum (even width zero), which would invert a naive clamp
/// range. Canvas bounds win over minimum size here; the minimum is restored
/// by the drag clamp that follows.
pub fn clamp_resize(frame: Frame, handle: HandleKind, canvas: CanvasSize) -> Frame {
    let mut x0 = frame.x;
    let mut y0 = frame.y;
    let mut x1 = frame.right();
    let mut y1 = frame.bottom();

    if handle.moves_left() {
        x0 = x0.min(x1 - MIN_ELEMENT_WIDTH).max(0.0);
    }
    if handle.moves_right() {
        x1 = x1.min(canvas.width).max(x0 + MIN_ELEMENT_WIDTH);
    }
    if handle.moves_top() {
        y0 = y0.min(y1 - MIN_ELEMENT_HEIGHT).max(0.0);
    }
    if handle.moves_bottom() {
        y1 = y1.min(canvas.height).max(y0 + MIN_ELEMENT_HEIGHT);
    }

    Frame::new(x0, y0, x1 - x0, y1 - y0)
}
