//! Input plumbing: raw pointer/keyboard events in, editor messages out.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer event type for unified mouse/touch handling. Positions are in
/// screen pixels; the editor divides by zoom to reach canvas units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

/// A message the interaction state machine consumes. All positions are in
/// screen pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EditorMessage {
    PointerDown { position: Point, modifiers: Modifiers },
    PointerMove { position: Point },
    PointerUp { position: Point },
    DoubleClick { position: Point },
    TextInput(String),
    Backspace,
    EscapePressed,
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Translates raw pointer events into editor messages, synthesizing
/// [`EditorMessage::DoubleClick`] from click timing and distance.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    last_click_time: Option<Instant>,
    last_click_position: Option<Point>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a raw pointer event. A left-button press that qualifies as a
    /// double click produces `DoubleClick` instead of `PointerDown`; the
    /// click memory resets so a triple click does not chain.
    pub fn translate(&mut self, event: PointerEvent) -> Option<EditorMessage> {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
                modifiers,
            } => {
                let now = Instant::now();
                let is_double = match (self.last_click_time, self.last_click_position) {
                    (Some(last_time), Some(last_pos)) => {
                        let elapsed = now.duration_since(last_time).as_millis();
                        let distance = (position - last_pos).hypot();
                        elapsed < DOUBLE_CLICK_TIME_MS && distance < DOUBLE_CLICK_DISTANCE
                    }
                    _ => false,
                };
                if is_double {
                    self.last_click_time = None;
                    self.last_click_position = None;
                    Some(EditorMessage::DoubleClick { position })
                } else {
                    self.last_click_time = Some(now);
                    self.last_click_position = Some(position);
                    Some(EditorMessage::PointerDown { position, modifiers })
                }
            }
            PointerEvent::Down { .. } => None,
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => Some(EditorMessage::PointerUp { position }),
            PointerEvent::Up { .. } => None,
            PointerEvent::Move { position } => Some(EditorMessage::PointerMove { position }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left_down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn test_rapid_second_click_is_double() {
        let mut tracker = InputTracker::new();
        assert!(matches!(
            tracker.translate(left_down(100.0, 100.0)),
            Some(EditorMessage::PointerDown { .. })
        ));
        assert!(matches!(
            tracker.translate(left_down(101.0, 100.0)),
            Some(EditorMessage::DoubleClick { .. })
        ));
        // Third rapid click starts a fresh sequence.
        assert!(matches!(
            tracker.translate(left_down(101.0, 100.0)),
            Some(EditorMessage::PointerDown { .. })
        ));
    }

    #[test]
    fn test_distant_second_click_is_single() {
        let mut tracker = tracker_with_click(100.0, 100.0);
        assert!(matches!(
            tracker.translate(left_down(200.0, 100.0)),
            Some(EditorMessage::PointerDown { .. })
        ));
    }

    #[test]
    fn test_non_left_buttons_ignored() {
        let mut tracker = InputTracker::new();
        let event = PointerEvent::Down {
            position: Point::ZERO,
            button: MouseButton::Right,
            modifiers: Modifiers::default(),
        };
        assert!(tracker.translate(event).is_none());
    }

    fn tracker_with_click(x: f64, y: f64) -> InputTracker {
        let mut tracker = InputTracker::new();
        tracker.translate(left_down(x, y));
        tracker
    }
}
