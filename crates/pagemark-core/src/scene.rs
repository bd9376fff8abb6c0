//! Scene document: elements on a fixed-size canvas, with transient edits
//! that become durable only through an explicit commit.

use crate::elements::{Element, ElementId, Frame};
use crate::guides::clamp_drag;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Default page size: A4 portrait at 96 dpi.
pub const DEFAULT_CANVAS_WIDTH: f64 = 794.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1123.0;

/// Errors from scene serialization.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("scene deserialization failed: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("scene has a non-finite canvas size")]
    InvalidCanvas,
}

/// Fixed canvas dimensions in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// The elements whose state a commit made durable, with their final frames.
#[derive(Debug, Clone)]
pub struct CommitRecord {
    pub elements: Vec<Element>,
}

/// A scene document containing all elements.
///
/// Frames changed via [`Scene::apply_transient`] take effect immediately for
/// rendering and hit tests, but the change is only acknowledged as durable
/// when [`Scene::commit`] flushes the dirty set. Callers that persist the
/// scene should do so on commit records, not on every transient mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Canvas dimensions. Fixed for the lifetime of the scene.
    pub canvas: CanvasSize,
    /// All elements, keyed by ID.
    pub elements: HashMap<ElementId, Element>,
    /// Pre-change snapshots of elements mutated since the last commit. A
    /// commit compares against these, so a gesture that returns an element
    /// to its starting state counts as no change.
    #[serde(skip)]
    baselines: HashMap<ElementId, Element>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with the default page size.
    pub fn new() -> Self {
        Self::with_canvas(CanvasSize::default())
    }

    pub fn with_canvas(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            elements: HashMap::new(),
            baselines: HashMap::new(),
        }
    }

    /// Insert an element, clamping its frame into the canvas. Returns the ID.
    pub fn insert(&mut self, mut element: Element) -> ElementId {
        element.frame = clamp_drag(element.frame, self.canvas);
        let id = element.id();
        log::debug!("insert element {} ({})", id, element.kind.name());
        self.elements.insert(id, element);
        id
    }

    /// Remove an element. Pending transient state for it is discarded.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.baselines.remove(&id);
        self.elements.remove(&id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Elements in paint order (back to front): ascending z-index, ties
    /// broken by ID so the order is total and stable.
    pub fn elements_ordered(&self) -> Vec<&Element> {
        let mut out: Vec<&Element> = self.elements.values().collect();
        out.sort_by_key(|e| (e.z_index, e.id()));
        out
    }

    /// Topmost element whose frame contains the point, if any.
    pub fn element_at(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.elements_ordered()
            .iter()
            .rev()
            .find(|e| e.hit_test(point, tolerance))
            .map(|e| e.id())
    }

    /// All elements at a point, front to back.
    pub fn elements_at(&self, point: Point, tolerance: f64) -> Vec<ElementId> {
        self.elements_ordered()
            .iter()
            .rev()
            .filter(|e| e.hit_test(point, tolerance))
            .map(|e| e.id())
            .collect()
    }

    /// Raise an element above everything else.
    pub fn bring_to_front(&mut self, id: ElementId) {
        let top = self.elements.values().map(|e| e.z_index).max().unwrap_or(0);
        if let Some(element) = self.elements.get_mut(&id) {
            if element.z_index <= top {
                let baseline = element.clone();
                element.z_index = top + 1;
                self.baselines.entry(id).or_insert(baseline);
            }
        }
    }

    /// Lower an element below everything else.
    pub fn send_to_back(&mut self, id: ElementId) {
        let bottom = self.elements.values().map(|e| e.z_index).min().unwrap_or(0);
        if let Some(element) = self.elements.get_mut(&id) {
            if element.z_index >= bottom {
                let baseline = element.clone();
                element.z_index = bottom - 1;
                self.baselines.entry(id).or_insert(baseline);
            }
        }
    }

    /// Apply a transient frame change during an active gesture.
    ///
    /// Non-finite frames are rejected (no-op), finite frames are clamped
    /// into the canvas. Returns true if the stored frame actually changed;
    /// only then is a pre-change baseline recorded for the next commit.
    pub fn apply_transient(&mut self, id: ElementId, frame: Frame) -> bool {
        if !frame.is_finite() {
            log::warn!("rejecting non-finite frame for element {id}");
            return false;
        }
        let clamped = clamp_drag(frame, self.canvas);
        let Some(element) = self.elements.get_mut(&id) else {
            return false;
        };
        if element.frame == clamped {
            return false;
        }
        let baseline = element.clone();
        element.frame = clamped;
        self.baselines.entry(id).or_insert(baseline);
        true
    }

    /// Acknowledge all transient changes since the last commit as durable.
    ///
    /// Only elements whose current state differs from their pre-change
    /// baseline enter the record, so a gesture with zero net movement
    /// produces no record at all.
    pub fn commit(&mut self) -> Option<CommitRecord> {
        let mut elements: Vec<Element> = Vec::new();
        for (id, baseline) in self.baselines.drain() {
            if let Some(current) = self.elements.get(&id) {
                if *current != baseline {
                    elements.push(current.clone());
                }
            }
        }
        if elements.is_empty() {
            return None;
        }
        elements.sort_by_key(|e| e.id());
        log::debug!("commit: {} element(s)", elements.len());
        Some(CommitRecord { elements })
    }

    /// Replace a text element's content and commit it immediately.
    ///
    /// Returns `None` if the element is missing, is not a text element, or
    /// already holds identical content.
    pub fn commit_content(&mut self, id: ElementId, content: String) -> Option<CommitRecord> {
        let element = self.elements.get_mut(&id)?;
        let crate::elements::ElementKind::Text { content: existing, .. } = &mut element.kind
        else {
            return None;
        };
        if *existing == content {
            return None;
        }
        *existing = content;
        log::debug!("commit content for element {id}");
        Some(CommitRecord {
            elements: vec![element.clone()],
        })
    }

    /// Whether any element currently differs from its pre-change baseline.
    pub fn has_pending_changes(&self) -> bool {
        self.baselines
            .iter()
            .any(|(id, baseline)| self.elements.get(id).is_some_and(|c| c != baseline))
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        serde_json::to_string_pretty(self).map_err(SceneError::Serialize)
    }

    /// Deserialize a scene from JSON. Frames are re-clamped and element
    /// styles re-sanitized, so a hand-edited file cannot violate the scene
    /// invariants.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let mut scene: Scene = serde_json::from_str(json).map_err(SceneError::Deserialize)?;
        if !scene.canvas.is_finite() {
            return Err(SceneError::InvalidCanvas);
        }
        let canvas = scene.canvas;
        for element in scene.elements.values_mut() {
            element.frame = clamp_drag(element.frame, canvas);
            element.kind.sanitize();
        }
        scene.baselines.clear();
        Ok(scene)
    }
}
