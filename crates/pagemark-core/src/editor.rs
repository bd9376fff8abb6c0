//! Interaction state machine: selection, drag, resize and inline text
//! editing, driven by [`EditorMessage`]s.

use crate::elements::{ElementId, ElementKind, Frame};
use crate::guides::{
    HandleKind, SMART_GUIDE_THRESHOLD, SmartGuide, apply_resize, clamp_resize, quantize_frame,
    snap_drag, snap_resize,
};
use crate::input::{EditorMessage, Modifiers};
use crate::scene::{CommitRecord, Scene};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hit tolerance for resize handles, in screen pixels (divided by zoom).
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// Hit tolerance for element bodies, in screen pixels (divided by zoom).
const BODY_HIT_TOLERANCE: f64 = 5.0;

/// Editor behavior settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Grid cell size in canvas units; quantization target when smart
    /// snapping is off.
    pub grid_size: f64,
    /// Snap dragged and resized frames to other elements and the canvas
    /// center. Mutually exclusive with grid quantization within a gesture.
    pub smart_snapping: bool,
    pub show_grid: bool,
    /// Screen pixels per canvas unit.
    pub zoom: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_size: crate::guides::GRID_SIZE,
            smart_snapping: true,
            show_grid: true,
            zoom: 1.0,
        }
    }
}

impl EditorSettings {
    fn effective_zoom(&self) -> f64 {
        if self.zoom.is_finite() && self.zoom > 0.0 {
            self.zoom
        } else {
            1.0
        }
    }
}

/// Events emitted by the editor for the host to react to.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    SelectionChanged(Vec<ElementId>),
    /// An element's frame changed transiently during a gesture.
    ElementChanged(ElementId),
    /// A gesture or text edit finished with net changes.
    Committed(CommitRecord),
    TextEditStarted(ElementId),
    TextEditEnded { id: ElementId, committed: bool },
}

/// State for a single-element drag.
#[derive(Debug, Clone)]
struct DragState {
    id: ElementId,
    origin: Frame,
    start: Point,
    suppress_snap: bool,
}

/// State for dragging every member of a multi-selection at once.
#[derive(Debug, Clone)]
struct MultiDragState {
    /// The member under the pointer; its snap result drives the whole group.
    primary: ElementId,
    origins: HashMap<ElementId, Frame>,
    start: Point,
    suppress_snap: bool,
}

/// State for a handle resize of the sole selected element.
#[derive(Debug, Clone)]
struct ResizeState {
    id: ElementId,
    handle: HandleKind,
    origin: Frame,
    start: Point,
    suppress_snap: bool,
}

/// State for inline text editing. The buffer is separate from the scene
/// until commit, so Escape can discard it without touching the element.
#[derive(Debug, Clone)]
struct TextEditState {
    id: ElementId,
    buffer: String,
}

#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    DragSingle(DragState),
    DragMulti(MultiDragState),
    Resize(ResizeState),
    EditingText(TextEditState),
}

/// The layout editor: a scene plus interaction state.
///
/// The host feeds it [`EditorMessage`]s (positions in screen pixels) and
/// drains [`EditorEvent`]s after each call to [`Editor::dispatch`].
#[derive(Debug)]
pub struct Editor {
    pub scene: Scene,
    pub settings: EditorSettings,
    selection: Vec<ElementId>,
    gesture: Gesture,
    guides: Vec<SmartGuide>,
    events: Vec<EditorEvent>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Scene::new())
    }
}

impl Editor {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            settings: EditorSettings::default(),
            selection: Vec::new(),
            gesture: Gesture::Idle,
            guides: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Currently selected element IDs, in selection order.
    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    /// Guides active for the gesture in progress. Empty outside gestures.
    pub fn guides(&self) -> &[SmartGuide] {
        &self.guides
    }

    /// The element being text-edited and its live buffer, if any.
    pub fn editing(&self) -> Option<(ElementId, &str)> {
        match &self.gesture {
            Gesture::EditingText(state) => Some((state.id, state.buffer.as_str())),
            _ => None,
        }
    }

    /// The element the current gesture acts on: the dragged or resized
    /// element, the multi-drag primary, or the element being edited.
    pub fn active_element(&self) -> Option<ElementId> {
        match &self.gesture {
            Gesture::Idle => None,
            Gesture::DragSingle(state) => Some(state.id),
            Gesture::DragMulti(state) => Some(state.primary),
            Gesture::Resize(state) => Some(state.id),
            Gesture::EditingText(state) => Some(state.id),
        }
    }

    /// Whether a drag or resize gesture is in progress.
    pub fn gesture_active(&self) -> bool {
        matches!(
            self.gesture,
            Gesture::DragSingle(_) | Gesture::DragMulti(_) | Gesture::Resize(_)
        )
    }

    /// Drain events produced since the last call.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Feed one message through the state machine.
    pub fn dispatch(&mut self, message: EditorMessage) {
        match message {
            EditorMessage::PointerDown { position, modifiers } => {
                self.on_pointer_down(self.to_canvas(position), modifiers);
            }
            EditorMessage::PointerMove { position } => {
                self.on_pointer_move(self.to_canvas(position));
            }
            EditorMessage::PointerUp { position } => {
                self.on_pointer_up(self.to_canvas(position));
            }
            EditorMessage::DoubleClick { position } => {
                self.on_double_click(self.to_canvas(position));
            }
            EditorMessage::TextInput(text) => {
                if let Gesture::EditingText(state) = &mut self.gesture {
                    state.buffer.push_str(&text);
                }
            }
            EditorMessage::Backspace => {
                if let Gesture::EditingText(state) = &mut self.gesture {
                    state.buffer.pop();
                }
            }
            EditorMessage::EscapePressed => self.on_escape(),
        }
    }

    fn to_canvas(&self, position: Point) -> Point {
        let zoom = self.settings.effective_zoom();
        Point::new(position.x / zoom, position.y / zoom)
    }

    fn set_selection(&mut self, selection: Vec<ElementId>) {
        if self.selection != selection {
            self.selection = selection;
            self.events
                .push(EditorEvent::SelectionChanged(self.selection.clone()));
        }
    }

    fn on_pointer_down(&mut self, point: Point, modifiers: Modifiers) {
        match self.gesture {
            // Stray press while a gesture is already running.
            Gesture::DragSingle(_) | Gesture::DragMulti(_) | Gesture::Resize(_) => return,
            Gesture::EditingText(_) => {
                self.commit_text_edit();
            }
            Gesture::Idle => {}
        }

        let zoom = self.settings.effective_zoom();
        let suppress_snap = modifiers.alt;

        // Handles of a sole selection take priority over element bodies.
        if let [selected] = self.selection[..] {
            if let Some(element) = self.scene.element(selected) {
                let frame = element.frame;
                let tolerance = HANDLE_HIT_TOLERANCE / zoom;
                if let Some(handle) = hit_test_handles(frame, point, tolerance) {
                    log::debug!("resize start: element {selected}, handle {handle:?}");
                    self.gesture = Gesture::Resize(ResizeState {
                        id: selected,
                        handle,
                        origin: frame,
                        start: point,
                        suppress_snap,
                    });
                    return;
                }
            }
        }

        let hit = self.scene.element_at(point, BODY_HIT_TOLERANCE / zoom);
        let Some(id) = hit else {
            self.set_selection(Vec::new());
            return;
        };

        if modifiers.shift || modifiers.ctrl {
            // Additive toggle; no gesture starts.
            let mut selection = self.selection.clone();
            if let Some(pos) = selection.iter().position(|&s| s == id) {
                selection.remove(pos);
            } else {
                selection.push(id);
            }
            self.set_selection(selection);
            return;
        }

        if self.selection.contains(&id) && self.selection.len() > 1 {
            // Drag the whole multi-selection, led by the element under the
            // pointer.
            let origins: HashMap<ElementId, Frame> = self
                .selection
                .iter()
                .filter_map(|&m| self.scene.element(m).map(|e| (m, e.frame)))
                .collect();
            log::debug!("multi-drag start: {} element(s)", origins.len());
            self.gesture = Gesture::DragMulti(MultiDragState {
                primary: id,
                origins,
                start: point,
                suppress_snap,
            });
            return;
        }

        let origin = match self.scene.element(id) {
            Some(element) => element.frame,
            None => return,
        };
        self.set_selection(vec![id]);
        log::debug!("drag start: element {id}");
        self.gesture = Gesture::DragSingle(DragState {
            id,
            origin,
            start: point,
            suppress_snap,
        });
    }

    fn on_pointer_move(&mut self, point: Point) {
        match self.gesture.clone() {
            Gesture::Idle | Gesture::EditingText(_) => {}
            Gesture::DragSingle(state) => {
                let delta = point - state.start;
                if !delta.is_finite() {
                    return;
                }
                let candidate = state.origin.translated(delta);
                let others = self.frames_except(&[state.id]);
                let (frame, guides) =
                    self.adjust_drag(candidate, &others, state.suppress_snap);
                self.guides = guides;
                if self.scene.apply_transient(state.id, frame) {
                    self.events.push(EditorEvent::ElementChanged(state.id));
                }
            }
            Gesture::DragMulti(state) => {
                let delta = point - state.start;
                if !delta.is_finite() {
                    return;
                }
                let members: Vec<ElementId> = state.origins.keys().copied().collect();
                let others = self.frames_except(&members);

                // The primary element's snap decides the shared delta; every
                // member then clamps independently.
                let Some(&primary_origin) = state.origins.get(&state.primary) else {
                    return;
                };
                let candidate = primary_origin.translated(delta);
                let (adjusted, guides) =
                    self.adjust_drag(candidate, &others, state.suppress_snap);
                self.guides = guides;
                let shared = Vec2::new(adjusted.x - primary_origin.x, adjusted.y - primary_origin.y);

                for (&member, &origin) in &state.origins {
                    if self.scene.apply_transient(member, origin.translated(shared)) {
                        self.events.push(EditorEvent::ElementChanged(member));
                    }
                }
            }
            Gesture::Resize(state) => {
                let delta = point - state.start;
                if !delta.is_finite() {
                    return;
                }
                let candidate = apply_resize(state.origin, state.handle, delta);
                let others = self.frames_except(&[state.id]);
                let (frame, guides) =
                    self.adjust_resize(candidate, state.handle, &others, state.suppress_snap);
                self.guides = guides;
                let frame = clamp_resize(frame, state.handle, self.scene.canvas);
                if self.scene.apply_transient(state.id, frame) {
                    self.events.push(EditorEvent::ElementChanged(state.id));
                }
            }
        }
    }

    fn on_pointer_up(&mut self, _point: Point) {
        if !self.gesture_active() {
            return;
        }
        self.guides.clear();
        self.gesture = Gesture::Idle;
        if let Some(record) = self.scene.commit() {
            log::debug!("gesture committed {} element(s)", record.elements.len());
            self.events.push(EditorEvent::Committed(record));
        }
    }

    fn on_double_click(&mut self, point: Point) {
        if matches!(self.gesture, Gesture::EditingText(_)) {
            self.commit_text_edit();
        }
        let zoom = self.settings.effective_zoom();
        let Some(id) = self.scene.element_at(point, BODY_HIT_TOLERANCE / zoom) else {
            self.set_selection(Vec::new());
            return;
        };
        self.set_selection(vec![id]);
        let Some(element) = self.scene.element(id) else {
            return;
        };
        if let ElementKind::Text { content, .. } = &element.kind {
            let buffer = content.clone();
            log::debug!("text edit start: element {id}");
            self.gesture = Gesture::EditingText(TextEditState { id, buffer });
            self.events.push(EditorEvent::TextEditStarted(id));
        }
    }

    fn on_escape(&mut self) {
        match &self.gesture {
            Gesture::EditingText(state) => {
                // Discard the buffer; the element keeps its prior content.
                let id = state.id;
                log::debug!("text edit cancelled: element {id}");
                self.gesture = Gesture::Idle;
                self.events
                    .push(EditorEvent::TextEditEnded { id, committed: false });
            }
            Gesture::Idle => {
                self.set_selection(Vec::new());
            }
            _ => {}
        }
    }

    /// Commit the active text edit, if any, writing the buffer into the
    /// element. A buffer identical to the stored content commits nothing.
    pub fn commit_text_edit(&mut self) {
        let Gesture::EditingText(state) = std::mem::replace(&mut self.gesture, Gesture::Idle)
        else {
            return;
        };
        let committed = match self.scene.commit_content(state.id, state.buffer) {
            Some(record) => {
                self.events.push(EditorEvent::Committed(record));
                true
            }
            None => false,
        };
        self.events.push(EditorEvent::TextEditEnded {
            id: state.id,
            committed,
        });
    }

    /// Frames of every element not in `exclude`, as snap candidates.
    fn frames_except(&self, exclude: &[ElementId]) -> Vec<Rect> {
        self.scene
            .elements
            .values()
            .filter(|e| !exclude.contains(&e.id()))
            .map(|e| e.bounds())
            .collect()
    }

    /// Pick the per-move adjustment: smart snapping when enabled, grid
    /// quantization otherwise. Snap suppression (alt at pointer-down)
    /// forces the grid path for the whole gesture.
    fn adjust_drag(
        &self,
        candidate: Frame,
        others: &[Rect],
        suppress_snap: bool,
    ) -> (Frame, Vec<SmartGuide>) {
        if self.settings.smart_snapping && !suppress_snap {
            let result = snap_drag(candidate, others, self.scene.canvas, SMART_GUIDE_THRESHOLD);
            (result.frame, result.guides)
        } else {
            (
                quantize_frame(candidate, self.settings.grid_size, false),
                Vec::new(),
            )
        }
    }

    fn adjust_resize(
        &self,
        candidate: Frame,
        handle: HandleKind,
        others: &[Rect],
        suppress_snap: bool,
    ) -> (Frame, Vec<SmartGuide>) {
        if self.settings.smart_snapping && !suppress_snap {
            let result = snap_resize(
                candidate,
                handle,
                others,
                self.scene.canvas,
                SMART_GUIDE_THRESHOLD,
            );
            (result.frame, result.guides)
        } else {
            (
                quantize_frame(candidate, self.settings.grid_size, true),
                Vec::new(),
            )
        }
    }
}

/// Hit-test the 8 resize handles of a frame, nearest handle first.
pub fn hit_test_handles(frame: Frame, point: Point, tolerance: f64) -> Option<HandleKind> {
    let mut best: Option<(f64, HandleKind)> = None;
    for handle in HandleKind::all() {
        let dist = (handle.position(frame) - point).hypot();
        if dist <= tolerance && best.map_or(true, |(d, _)| dist < d) {
            best = Some((dist, handle));
        }
    }
    best.map(|(_, handle)| handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Element;
    use crate::guides::GuideKind;

    fn down(x: f64, y: f64) -> EditorMessage {
        EditorMessage::PointerDown {
            position: Point::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    fn down_with(x: f64, y: f64, modifiers: Modifiers) -> EditorMessage {
        EditorMessage::PointerDown {
            position: Point::new(x, y),
            modifiers,
        }
    }

    fn mv(x: f64, y: f64) -> EditorMessage {
        EditorMessage::PointerMove {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> EditorMessage {
        EditorMessage::PointerUp {
            position: Point::new(x, y),
        }
    }

    fn editor_with_shape(x: f64, y: f64) -> (Editor, ElementId) {
        let mut editor = Editor::new(Scene::new());
        editor.settings.smart_snapping = false;
        editor.settings.grid_size = 0.0;
        let id = editor
            .scene
            .insert(Element::shape(Frame::new(x, y, 80.0, 40.0), Default::default()));
        (editor, id)
    }

    fn committed_records(events: &[EditorEvent]) -> Vec<&CommitRecord> {
        events
            .iter()
            .filter_map(|e| match e {
                EditorEvent::Committed(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_click_selects_and_drag_commits_once() {
        let (mut editor, id) = editor_with_shape(100.0, 100.0);

        editor.dispatch(down(120.0, 120.0));
        assert_eq!(editor.selection(), &[id]);

        editor.dispatch(mv(140.0, 130.0));
        editor.dispatch(mv(160.0, 140.0));
        editor.dispatch(up(160.0, 140.0));

        let events = editor.take_events();
        let records = committed_records(&events);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].elements[0].frame, Frame::new(140.0, 120.0, 80.0, 40.0));
    }

    #[test]
    fn test_zero_net_movement_commits_nothing() {
        let (mut editor, _id) = editor_with_shape(100.0, 100.0);

        editor.dispatch(down(120.0, 120.0));
        editor.dispatch(mv(140.0, 120.0));
        editor.dispatch(mv(120.0, 120.0));
        editor.dispatch(up(120.0, 120.0));

        let events = editor.take_events();
        assert!(committed_records(&events).is_empty());
        assert!(!editor.scene.has_pending_changes());
    }

    #[test]
    fn test_click_empty_canvas_clears_selection() {
        let (mut editor, id) = editor_with_shape(100.0, 100.0);
        editor.dispatch(down(120.0, 120.0));
        editor.dispatch(up(120.0, 120.0));
        assert_eq!(editor.selection(), &[id]);

        editor.dispatch(down(600.0, 900.0));
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_additive_toggle() {
        let (mut editor, a) = editor_with_shape(100.0, 100.0);
        let b = editor
            .scene
            .insert(Element::shape(Frame::new(300.0, 100.0, 80.0, 40.0), Default::default()));

        editor.dispatch(down(120.0, 120.0));
        editor.dispatch(up(120.0, 120.0));

        let shift = Modifiers { shift: true, ..Default::default() };
        editor.dispatch(down_with(320.0, 120.0, shift));
        assert_eq!(editor.selection(), &[a, b]);

        // Toggling a member off again.
        editor.dispatch(down_with(320.0, 120.0, shift));
        assert_eq!(editor.selection(), &[a]);
    }

    #[test]
    fn test_multi_drag_moves_all_members() {
        let (mut editor, a) = editor_with_shape(100.0, 100.0);
        let b = editor
            .scene
            .insert(Element::shape(Frame::new(300.0, 200.0, 80.0, 40.0), Default::default()));

        editor.dispatch(down(120.0, 120.0));
        editor.dispatch(up(120.0, 120.0));
        let shift = Modifiers { shift: true, ..Default::default() };
        editor.dispatch(down_with(320.0, 220.0, shift));

        // Drag from a member of the selection: whole group moves.
        editor.dispatch(down(120.0, 120.0));
        editor.dispatch(mv(135.0, 130.0));
        editor.dispatch(up(135.0, 130.0));

        assert_eq!(editor.scene.element(a).unwrap().frame.x, 115.0);
        assert_eq!(editor.scene.element(b).unwrap().frame.x, 315.0);
        let events = editor.take_events();
        assert_eq!(committed_records(&events).len(), 1);
        assert_eq!(committed_records(&events)[0].elements.len(), 2);
    }

    #[test]
    fn test_multi_drag_clamps_members_independently() {
        let (mut editor, a) = editor_with_shape(10.0, 100.0);
        let b = editor
            .scene
            .insert(Element::shape(Frame::new(300.0, 100.0, 80.0, 40.0), Default::default()));

        editor.dispatch(down(320.0, 120.0));
        editor.dispatch(up(320.0, 120.0));
        let shift = Modifiers { shift: true, ..Default::default() };
        editor.dispatch(down_with(30.0, 120.0, shift));

        // Drag left by 50, led by b; a hits the canvas edge and stops there.
        editor.dispatch(down(320.0, 120.0));
        editor.dispatch(mv(270.0, 120.0));
        editor.dispatch(up(270.0, 120.0));

        assert_eq!(editor.scene.element(b).unwrap().frame.x, 250.0);
        assert_eq!(editor.scene.element(a).unwrap().frame.x, 0.0);
    }

    #[test]
    fn test_smart_snap_drag_produces_guides() {
        let mut editor = Editor::new(Scene::new());
        let _fixed = editor
            .scene
            .insert(Element::shape(Frame::new(200.0, 400.0, 100.0, 60.0), Default::default()));
        let moving = editor
            .scene
            .insert(Element::shape(Frame::new(100.0, 100.0, 80.0, 40.0), Default::default()));

        editor.dispatch(down(120.0, 120.0));
        // Left edge lands at 203, within threshold of fixed's left edge.
        editor.dispatch(mv(223.0, 120.0));

        assert_eq!(editor.scene.element(moving).unwrap().frame.x, 200.0);
        assert_eq!(editor.guides().len(), 1);
        assert_eq!(editor.guides()[0].kind, GuideKind::ElementEdge);

        editor.dispatch(up(223.0, 120.0));
        assert!(editor.guides().is_empty());
    }

    #[test]
    fn test_alt_falls_back_to_grid_quantization() {
        let mut editor = Editor::new(Scene::new());
        let _fixed = editor
            .scene
            .insert(Element::shape(Frame::new(200.0, 400.0, 100.0, 60.0), Default::default()));
        let moving = editor
            .scene
            .insert(Element::shape(Frame::new(100.0, 100.0, 80.0, 40.0), Default::default()));

        // Alt at pointer-down: no smart snapping for the gesture, grid
        // quantization instead. Left edge lands at 103 and rounds to 100
        // (grid 10), not to the fixed element's edge at 200 with a guide.
        let alt = Modifiers { alt: true, ..Default::default() };
        editor.dispatch(down_with(120.0, 120.0, alt));
        editor.dispatch(mv(123.0, 120.0));

        assert_eq!(editor.scene.element(moving).unwrap().frame.x, 100.0);
        assert!(editor.guides().is_empty());

        // A move into snap range of the fixed element still quantizes.
        editor.dispatch(mv(223.0, 120.0));
        assert_eq!(editor.scene.element(moving).unwrap().frame.x, 200.0);
        assert!(editor.guides().is_empty());
    }

    #[test]
    fn test_grid_quantization_when_snapping_off() {
        let (mut editor, id) = editor_with_shape(100.0, 100.0);
        editor.settings.grid_size = 10.0;

        editor.dispatch(down(120.0, 120.0));
        editor.dispatch(mv(143.0, 127.0));
        editor.dispatch(up(143.0, 127.0));

        // Position quantized, size untouched and no guides ever shown.
        assert_eq!(editor.scene.element(id).unwrap().frame, Frame::new(120.0, 110.0, 80.0, 40.0));
        assert!(editor.guides().is_empty());
    }

    #[test]
    fn test_resize_via_west_handle_anchors_right_edge() {
        let mut editor = Editor::new(Scene::new());
        editor.settings.smart_snapping = false;
        editor.settings.grid_size = 0.0;
        let id = editor
            .scene
            .insert(Element::shape(Frame::new(50.0, 50.0, 80.0, 40.0), Default::default()));

        editor.dispatch(down(90.0, 70.0));
        editor.dispatch(up(90.0, 70.0));

        // Grab the left-edge handle at (50, 70) and drag right by 20.
        editor.dispatch(down(50.0, 70.0));
        editor.dispatch(mv(70.0, 70.0));
        editor.dispatch(up(70.0, 70.0));

        let frame = editor.scene.element(id).unwrap().frame;
        assert_eq!(frame, Frame::new(70.0, 50.0, 60.0, 40.0));
    }

    #[test]
    fn test_resize_pins_at_minimum() {
        let mut editor = Editor::new(Scene::new());
        editor.settings.smart_snapping = false;
        editor.settings.grid_size = 0.0;
        let id = editor
            .scene
            .insert(Element::shape(Frame::new(50.0, 50.0, 80.0, 40.0), Default::default()));

        editor.dispatch(down(90.0, 70.0));
        editor.dispatch(up(90.0, 70.0));

        // Drag the west handle far past the right edge.
        editor.dispatch(down(50.0, 70.0));
        editor.dispatch(mv(300.0, 70.0));
        editor.dispatch(up(300.0, 70.0));

        let frame = editor.scene.element(id).unwrap().frame;
        assert_eq!(frame.width, crate::elements::MIN_ELEMENT_WIDTH);
        assert_eq!(frame.right(), 130.0);
    }

    #[test]
    fn test_coarse_grid_resize_stays_valid() {
        // Grid cells larger than the minimum element size: quantization can
        // collapse the frame entirely. The gesture must survive and leave a
        // minimum-sized frame inside the canvas.
        let mut editor = Editor::new(Scene::new());
        editor.settings.smart_snapping = false;
        editor.settings.grid_size = 100.0;
        let id = editor
            .scene
            .insert(Element::shape(Frame::new(10.0, 100.0, 30.0, 40.0), Default::default()));

        editor.dispatch(down(25.0, 120.0));
        editor.dispatch(up(25.0, 120.0));
        assert_eq!(editor.selection(), &[id]);

        // Nudge the west handle; x and width both quantize to zero.
        editor.dispatch(down(10.0, 120.0));
        editor.dispatch(mv(12.0, 120.0));
        editor.dispatch(up(12.0, 120.0));

        let frame = editor.scene.element(id).unwrap().frame;
        assert!(frame.x >= 0.0);
        assert!(frame.width >= crate::elements::MIN_ELEMENT_WIDTH);
        assert!(frame.height >= crate::elements::MIN_ELEMENT_HEIGHT);
        assert!(frame.right() <= editor.scene.canvas.width);
    }

    #[test]
    fn test_zoom_scales_pointer_positions() {
        let (mut editor, id) = editor_with_shape(100.0, 100.0);
        editor.settings.zoom = 2.0;

        // Screen (240, 240) is canvas (120, 120).
        editor.dispatch(down(240.0, 240.0));
        assert_eq!(editor.selection(), &[id]);

        editor.dispatch(mv(280.0, 240.0));
        editor.dispatch(up(280.0, 240.0));
        assert_eq!(editor.scene.element(id).unwrap().frame.x, 120.0);
    }

    #[test]
    fn test_stray_pointer_down_during_gesture_ignored() {
        let (mut editor, id) = editor_with_shape(100.0, 100.0);

        editor.dispatch(down(120.0, 120.0));
        editor.dispatch(mv(140.0, 120.0));
        // Second press mid-gesture must not restart or retarget.
        editor.dispatch(down(600.0, 900.0));
        editor.dispatch(mv(150.0, 120.0));
        editor.dispatch(up(150.0, 120.0));

        assert_eq!(editor.selection(), &[id]);
        assert_eq!(editor.scene.element(id).unwrap().frame.x, 130.0);
    }

    #[test]
    fn test_double_click_edits_text_and_escape_cancels() {
        let mut editor = Editor::new(Scene::new());
        let id = editor.scene.insert(Element::text(Frame::new(100.0, 100.0, 120.0, 30.0), "hello"));

        editor.dispatch(EditorMessage::DoubleClick {
            position: Point::new(120.0, 115.0),
        });
        assert_eq!(editor.editing().map(|(i, _)| i), Some(id));

        editor.dispatch(EditorMessage::TextInput(" world".to_string()));
        assert_eq!(editor.editing().unwrap().1, "hello world");

        editor.dispatch(EditorMessage::EscapePressed);
        assert!(editor.editing().is_none());
        assert_eq!(editor.scene.element(id).unwrap().content(), Some("hello"));

        let events = editor.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, EditorEvent::TextEditEnded { committed: false, .. })));
    }

    #[test]
    fn test_text_edit_commit_on_pointer_down() {
        let mut editor = Editor::new(Scene::new());
        let id = editor.scene.insert(Element::text(Frame::new(100.0, 100.0, 120.0, 30.0), "hello"));

        editor.dispatch(EditorMessage::DoubleClick {
            position: Point::new(120.0, 115.0),
        });
        editor.dispatch(EditorMessage::Backspace);
        editor.dispatch(EditorMessage::TextInput("p!".to_string()));

        // Clicking empty canvas commits the buffer, then clears selection.
        editor.dispatch(down(600.0, 900.0));
        assert_eq!(editor.scene.element(id).unwrap().content(), Some("hellp!"));
        assert!(editor.selection().is_empty());

        let events = editor.take_events();
        assert_eq!(committed_records(&events).len(), 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, EditorEvent::TextEditEnded { committed: true, .. })));
    }

    #[test]
    fn test_double_click_on_shape_does_not_edit() {
        let (mut editor, id) = editor_with_shape(100.0, 100.0);
        editor.dispatch(EditorMessage::DoubleClick {
            position: Point::new(120.0, 120.0),
        });
        assert!(editor.editing().is_none());
        assert_eq!(editor.selection(), &[id]);
    }

    #[test]
    fn test_escape_clears_selection_when_idle() {
        let (mut editor, id) = editor_with_shape(100.0, 100.0);
        editor.dispatch(down(120.0, 120.0));
        editor.dispatch(up(120.0, 120.0));
        assert_eq!(editor.selection(), &[id]);

        editor.dispatch(EditorMessage::EscapePressed);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_hit_test_handles_prefers_nearest() {
        let frame = Frame::new(0.0, 0.0, 100.0, 60.0);
        assert_eq!(
            hit_test_handles(frame, Point::new(1.0, 1.0), 8.0),
            Some(HandleKind::TopLeft)
        );
        assert_eq!(
            hit_test_handles(frame, Point::new(50.0, 61.0), 8.0),
            Some(HandleKind::Bottom)
        );
        assert_eq!(hit_test_handles(frame, Point::new(50.0, 30.0), 8.0), None);
    }
}
