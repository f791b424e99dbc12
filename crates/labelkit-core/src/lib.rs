//! LabelKit Core Library
//!
//! Canvas interaction engine for the LabelKit label template designer:
//! coordinate transforms, element model, optimistic element store with
//! remote persistence, the pointer-driven gesture state machine and the
//! grid/ruler/label overlay renderer.

pub mod camera;
pub mod canvas;
pub mod command;
pub mod document;
pub mod elements;
pub mod events;
pub mod glyph;
pub mod handles;
pub mod input;
pub mod interaction;
pub mod overlay;
pub mod persistence;
pub mod selection;
pub mod snap;
pub mod store;

pub use camera::Camera;
pub use canvas::Canvas;
pub use command::{Command, dispatch};
pub use document::{CanvasDocument, GridSettings, LabelLayout};
pub use elements::{Element, ElementDraft, ElementId, ElementKind, ElementPatch};
pub use events::{CanvasEvent, EventBus};
pub use handles::{Handle, HandleKind};
pub use input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use interaction::{CommitRequest, Gesture, InteractionEngine};
pub use overlay::{DrawPrimitive, OverlayKind, OverlayToggles};
pub use persistence::{HttpAdapter, MemoryAdapter, PersistenceAdapter, PersistenceError};
pub use selection::{SelectionEvent, SelectionManager};
pub use snap::{SnapMode, SnapResult, snap_to_grid};
pub use store::ElementStore;
