//! Interaction state machine: interprets pointer/keyboard events against
//! the current geometry and selection, drives drag/resize/pan/zoom and
//! issues mutation intents to the element store.
//!
//! Local per-frame updates go through `ElementStore::update_local`; the
//! terminal commit of a gesture is handed back to the caller as a
//! [`CommitRequest`] so the event loop can await it without blocking
//! gesture handling.

use crate::canvas::Canvas;
use crate::elements::{ElementId, ElementPatch};
use crate::handles::{self, HANDLE_HIT_TOLERANCE, HandleKind};
use crate::input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::snap::{self, targets_from_bounds};
use kurbo::{Point, Size, Vec2};

/// Screen-space distance below which an empty-canvas press still counts
/// as a click (and clears the selection) rather than a drag.
const CLICK_SLOP: f64 = 3.0;

/// Nudge distances for arrow keys, in document pixels.
const NUDGE_STEP: f64 = 1.0;
const NUDGE_STEP_LARGE: f64 = 10.0;

/// One in-flight gesture. Exactly one state is active at a time and a
/// new gesture can only start from `Idle`.
#[derive(Debug, Clone)]
pub enum Gesture {
    Idle,
    Dragging {
        id: ElementId,
        origin_pointer: Point,
        origin_position: Point,
    },
    Resizing {
        id: ElementId,
        handle: HandleKind,
        origin_pointer: Point,
        origin_position: Point,
        origin_size: Size,
    },
    Panning {
        origin_pointer: Point,
        origin_pan: Vec2,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

/// Terminal mutation of a completed gesture, to be committed by the
/// caller through [`Canvas::commit_patch`].
#[derive(Debug, Clone)]
pub struct CommitRequest {
    pub id: ElementId,
    pub patch: ElementPatch,
}

/// Result of feeding one event into the engine.
#[derive(Debug, Default)]
pub struct EngineOutput {
    /// Terminal commit for a completed gesture or nudge, if any.
    pub commit: Option<CommitRequest>,
    /// Whether the event was handled. Unconsumed events (wheel without
    /// the zoom modifier) fall through to normal scrolling.
    pub consumed: bool,
}

impl EngineOutput {
    fn consumed() -> Self {
        Self {
            commit: None,
            consumed: true,
        }
    }

    fn commit(request: CommitRequest) -> Self {
        Self {
            commit: Some(request),
            consumed: true,
        }
    }

    fn unconsumed() -> Self {
        Self::default()
    }
}

/// The pointer-driven interaction engine.
pub struct InteractionEngine {
    gesture: Gesture,
    /// Set on an empty-canvas press; cleared once the pointer moves past
    /// the click slop. A release while still set clears the selection.
    pending_deselect: Option<Point>,
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionEngine {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
            pending_deselect: None,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Feed a pointer event into the engine.
    pub fn on_pointer_event(
        &mut self,
        canvas: &mut Canvas,
        event: &PointerEvent,
        modifiers: Modifiers,
    ) -> EngineOutput {
        match event {
            PointerEvent::Down { position, button } => {
                self.on_pointer_down(canvas, *position, *button, modifiers)
            }
            PointerEvent::Move { position } => self.on_pointer_move(canvas, *position),
            PointerEvent::Up { position, .. } => self.on_pointer_up(canvas, *position),
            PointerEvent::Scroll { position, delta } => {
                self.on_scroll(canvas, *position, *delta, modifiers)
            }
        }
    }

    fn on_pointer_down(
        &mut self,
        canvas: &mut Canvas,
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> EngineOutput {
        // A new gesture may only start from Idle.
        if !self.gesture.is_idle() {
            return EngineOutput::consumed();
        }

        let doc_point = canvas.camera.to_document(position);
        let handle_tolerance = HANDLE_HIT_TOLERANCE / canvas.camera.scale();

        // Resize handles of the selected element win over body hits.
        if button == MouseButton::Left {
            if let Some(id) = canvas.selection.selected() {
                if let Some(element) = canvas.store.get(id) {
                    if let Some(handle) =
                        handles::hit_test_handles(element.bounds(), doc_point, handle_tolerance)
                    {
                        self.gesture = Gesture::Resizing {
                            id,
                            handle,
                            origin_pointer: position,
                            origin_position: element.position,
                            origin_size: element.size,
                        };
                        return EngineOutput::consumed();
                    }
                }
            }
        }

        let hit = canvas.store.document().element_at_point(doc_point, 0.0);

        match hit {
            Some(id) if button == MouseButton::Left => {
                canvas.select(id);
                let origin_position = canvas
                    .store
                    .get(id)
                    .map(|e| e.position)
                    .unwrap_or(doc_point);
                self.gesture = Gesture::Dragging {
                    id,
                    origin_pointer: position,
                    origin_position,
                };
                EngineOutput::consumed()
            }
            None if button == MouseButton::Middle
                || (button == MouseButton::Left && modifiers.pan_modifier()) =>
            {
                self.gesture = Gesture::Panning {
                    origin_pointer: position,
                    origin_pan: canvas.camera.pan,
                };
                EngineOutput::consumed()
            }
            None if button == MouseButton::Left => {
                self.pending_deselect = Some(position);
                EngineOutput::consumed()
            }
            _ => EngineOutput::consumed(),
        }
    }

    fn on_pointer_move(&mut self, canvas: &mut Canvas, position: Point) -> EngineOutput {
        if let Some(press) = self.pending_deselect {
            if (position - press).hypot() > CLICK_SLOP {
                self.pending_deselect = None;
            }
        }

        match self.gesture {
            Gesture::Idle => EngineOutput::consumed(),
            Gesture::Dragging {
                id,
                origin_pointer,
                origin_position,
            } => {
                if canvas.store.get(id).is_none() {
                    self.abandon(id);
                    return EngineOutput::consumed();
                }
                let delta = canvas.camera.unscale_delta(position - origin_pointer);
                let mut new_position = origin_position + delta;
                new_position = self.snapped_position(canvas, id, new_position);
                canvas
                    .store
                    .update_local(id, &ElementPatch::position(new_position));
                EngineOutput::consumed()
            }
            Gesture::Resizing {
                id,
                handle,
                origin_pointer,
                origin_position,
                origin_size,
            } => {
                if canvas.store.get(id).is_none() {
                    self.abandon(id);
                    return EngineOutput::consumed();
                }
                let delta = canvas.camera.unscale_delta(position - origin_pointer);
                let (new_position, new_size) =
                    handles::resize_bounds(origin_position, origin_size, handle, delta);
                canvas
                    .store
                    .update_local(id, &ElementPatch::geometry(new_position, new_size));
                EngineOutput::consumed()
            }
            Gesture::Panning {
                origin_pointer,
                origin_pan,
            } => {
                // Panning stays in screen space: raw delta, no unscaling.
                canvas.camera.pan = origin_pan + (position - origin_pointer);
                EngineOutput::consumed()
            }
        }
    }

    fn on_pointer_up(&mut self, canvas: &mut Canvas, position: Point) -> EngineOutput {
        if let Some(press) = self.pending_deselect.take() {
            if (position - press).hypot() <= CLICK_SLOP {
                canvas.clear_selection();
            }
            return EngineOutput::consumed();
        }

        match self.finish_gesture(canvas) {
            Some(request) => EngineOutput::commit(request),
            None => EngineOutput::consumed(),
        }
    }

    fn on_scroll(
        &mut self,
        canvas: &mut Canvas,
        position: Point,
        delta: Vec2,
        modifiers: Modifiers,
    ) -> EngineOutput {
        if !modifiers.zoom_modifier() {
            // Without the modifier the wheel is not intercepted.
            return EngineOutput::unconsumed();
        }
        // Scrolling up (negative y) zooms in.
        canvas.camera.wheel_zoom(position, -delta.y);
        EngineOutput::consumed()
    }

    /// Feed a key event into the engine.
    pub fn on_key_event(
        &mut self,
        canvas: &mut Canvas,
        event: &KeyEvent,
        modifiers: Modifiers,
    ) -> EngineOutput {
        let KeyEvent::Pressed(key) = event else {
            return EngineOutput::unconsumed();
        };

        if key == "Escape" {
            return self.cancel(canvas);
        }

        let direction = match key.as_str() {
            "ArrowLeft" => Vec2::new(-1.0, 0.0),
            "ArrowRight" => Vec2::new(1.0, 0.0),
            "ArrowUp" => Vec2::new(0.0, -1.0),
            "ArrowDown" => Vec2::new(0.0, 1.0),
            _ => return EngineOutput::unconsumed(),
        };

        // Nudges apply only with a selection and no open gesture, and
        // commit immediately rather than batching into a drag.
        if !self.gesture.is_idle() {
            return EngineOutput::consumed();
        }
        let Some(id) = canvas.selection.selected() else {
            return EngineOutput::unconsumed();
        };
        let Some(element) = canvas.store.get(id) else {
            return EngineOutput::unconsumed();
        };

        let step = if modifiers.shift {
            NUDGE_STEP_LARGE
        } else {
            NUDGE_STEP
        };
        let patch = ElementPatch::position(element.position + direction * step);
        canvas.store.update_local(id, &patch);
        EngineOutput::commit(CommitRequest { id, patch })
    }

    /// Treat losing window focus (or the pointer leaving the canvas for
    /// good) as gesture completion, never as a stuck gesture.
    pub fn on_focus_lost(&mut self, canvas: &mut Canvas) -> EngineOutput {
        self.pending_deselect = None;
        match self.finish_gesture(canvas) {
            Some(request) => EngineOutput::commit(request),
            None => EngineOutput::consumed(),
        }
    }

    /// Cancel the open gesture, reverting the element to its pre-gesture
    /// geometry without committing.
    pub fn cancel(&mut self, canvas: &mut Canvas) -> EngineOutput {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => EngineOutput::unconsumed(),
            Gesture::Dragging {
                id, origin_position, ..
            } => {
                canvas
                    .store
                    .update_local(id, &ElementPatch::position(origin_position));
                EngineOutput::consumed()
            }
            Gesture::Resizing {
                id,
                origin_position,
                origin_size,
                ..
            } => {
                canvas
                    .store
                    .update_local(id, &ElementPatch::geometry(origin_position, origin_size));
                EngineOutput::consumed()
            }
            Gesture::Panning { origin_pan, .. } => {
                canvas.camera.pan = origin_pan;
                EngineOutput::consumed()
            }
        }
    }

    /// Complete the open gesture, producing the terminal commit for
    /// drag/resize gestures. Exactly one commit per completed gesture.
    fn finish_gesture(&mut self, canvas: &mut Canvas) -> Option<CommitRequest> {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle | Gesture::Panning { .. } => None,
            Gesture::Dragging { id, .. } => {
                let element = canvas.store.get(id)?;
                Some(CommitRequest {
                    id,
                    patch: ElementPatch::position(element.position),
                })
            }
            Gesture::Resizing { id, .. } => {
                let element = canvas.store.get(id)?;
                Some(CommitRequest {
                    id,
                    patch: ElementPatch::geometry(element.position, element.size),
                })
            }
        }
    }

    fn abandon(&mut self, id: ElementId) {
        log::debug!("element {id} vanished mid-gesture, abandoning");
        self.gesture = Gesture::Idle;
    }

    /// Snap a drag position against the grid and the other elements.
    fn snapped_position(&self, canvas: &Canvas, dragged: ElementId, position: Point) -> Point {
        if !canvas.toggles.show_snaplines || !canvas.snap_mode.is_enabled() {
            return position;
        }
        let document = canvas.store.document();
        let targets: Vec<_> = document
            .elements
            .iter()
            .filter(|e| e.id != dragged)
            .flat_map(|e| targets_from_bounds(e.bounds()))
            .collect();
        snap::snap_point_with_targets(position, canvas.snap_mode, document.grid.grid_size, &targets)
            .point
    }
}
