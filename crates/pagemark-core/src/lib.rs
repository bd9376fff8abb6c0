//! Pagemark Core Library
//!
//! Platform-agnostic scene model, snap-guide engine and interaction state
//! machine for the Pagemark layout editor.

pub mod editor;
pub mod elements;
pub mod guides;
pub mod input;
pub mod scene;

pub use editor::{Editor, EditorEvent, EditorSettings, HANDLE_HIT_TOLERANCE, hit_test_handles};
pub use elements::{
    Element, ElementId, ElementKind, Frame, MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH,
    SerializableColor,
};
pub use guides::{
    GRID_SIZE, GuideKind, GuideOrientation, HandleKind, SMART_GUIDE_THRESHOLD, SmartGuide,
};
pub use input::{EditorMessage, InputTracker, Modifiers, MouseButton, PointerEvent};
pub use scene::{CanvasSize, CommitRecord, Scene, SceneError};
