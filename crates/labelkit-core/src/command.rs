//! Command surface: discrete, named commands from toolbars and sidebars,
//! translated into canvas and interaction-engine operations.

use crate::camera::{Camera, WHEEL_ZOOM_STEP};
use crate::canvas::Canvas;
use crate::elements::{ElementKind, ElementPatch};
use crate::interaction::InteractionEngine;
use crate::overlay::OverlayKind;
use crate::persistence::PersistenceResult;
use kurbo::Vec2;

/// Nudge direction for keyboard-equivalent toolbar commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl NudgeDirection {
    fn vector(self) -> Vec2 {
        match self {
            NudgeDirection::Left => Vec2::new(-1.0, 0.0),
            NudgeDirection::Right => Vec2::new(1.0, 0.0),
            NudgeDirection::Up => Vec2::new(0.0, -1.0),
            NudgeDirection::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// Discrete commands crossing the canvas/chrome boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    AddElement(ElementKind),
    DeleteSelection,
    NudgeSelection { direction: NudgeDirection, large: bool },
    RaiseSelection,
    LowerSelection,
    ZoomToDocument,
    ZoomToObjects,
    ZoomPreset(f64),
    ZoomIn,
    ZoomOut,
    ToggleOverlay(OverlayKind),
}

/// Apply a command. Persistence failures are already surfaced through
/// the canvas event bus; the error is propagated for callers that retry.
pub async fn dispatch(
    canvas: &mut Canvas,
    engine: &mut InteractionEngine,
    command: Command,
) -> PersistenceResult<()> {
    match command {
        Command::AddElement(kind) => {
            canvas.add_element(kind).await?;
        }
        Command::DeleteSelection => {
            canvas.delete_selected().await?;
        }
        Command::NudgeSelection { direction, large } => {
            // Nudges never interleave with an open gesture.
            if !engine.gesture().is_idle() {
                return Ok(());
            }
            let Some(id) = canvas.selection.selected() else {
                return Ok(());
            };
            let Some(element) = canvas.store.get(id) else {
                return Ok(());
            };
            let step = if large { 10.0 } else { 1.0 };
            let patch = ElementPatch::position(element.position + direction.vector() * step);
            canvas.store.update_local(id, &patch);
            canvas.commit_patch(id, patch).await?;
        }
        Command::RaiseSelection => {
            if let Some((id, patch)) = canvas.raise_selected() {
                canvas.commit_patch(id, patch).await?;
            }
        }
        Command::LowerSelection => {
            if let Some((id, patch)) = canvas.lower_selected() {
                canvas.commit_patch(id, patch).await?;
            }
        }
        Command::ZoomToDocument => canvas.zoom_to_document(),
        Command::ZoomToObjects => canvas.zoom_to_objects(),
        Command::ZoomPreset(percent) => canvas.camera.set_preset_zoom(percent),
        Command::ZoomIn => {
            let zoom = canvas.camera.zoom_percent + WHEEL_ZOOM_STEP;
            canvas.camera.zoom_percent = Camera::clamp_preset_zoom(zoom);
        }
        Command::ZoomOut => {
            let zoom = canvas.camera.zoom_percent - WHEEL_ZOOM_STEP;
            canvas.camera.zoom_percent = Camera::clamp_preset_zoom(zoom);
        }
        Command::ToggleOverlay(kind) => canvas.toggles.toggle(kind),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PRESET_ZOOM_MIN;
    use crate::document::CanvasDocument;
    use crate::persistence::{MemoryAdapter, block_on};

    fn open_canvas() -> Canvas {
        let adapter = MemoryAdapter::new().with_document("t1", CanvasDocument::default());
        let mut canvas = Canvas::new(Box::new(adapter));
        block_on(canvas.open_template("t1")).unwrap();
        canvas
    }

    #[test]
    fn test_add_and_delete() {
        let mut canvas = open_canvas();
        let mut engine = InteractionEngine::new();

        block_on(dispatch(
            &mut canvas,
            &mut engine,
            Command::AddElement(ElementKind::Barcode),
        ))
        .unwrap();
        assert_eq!(canvas.store.document().len(), 1);
        assert!(canvas.selection.selected().is_some());

        block_on(dispatch(&mut canvas, &mut engine, Command::DeleteSelection)).unwrap();
        assert!(canvas.store.document().is_empty());
        assert_eq!(canvas.selection.selected(), None);
    }

    #[test]
    fn test_zoom_out_reaches_preset_minimum() {
        let mut canvas = open_canvas();
        let mut engine = InteractionEngine::new();
        canvas.camera.zoom_percent = 100.0;

        for _ in 0..20 {
            block_on(dispatch(&mut canvas, &mut engine, Command::ZoomOut)).unwrap();
        }
        // Discrete presets go below the interactive wheel floor
        assert_eq!(canvas.camera.zoom_percent, PRESET_ZOOM_MIN);
    }

    #[test]
    fn test_toggle_overlay() {
        let mut canvas = open_canvas();
        let mut engine = InteractionEngine::new();
        let before = canvas.toggles.show_margins;
        block_on(dispatch(
            &mut canvas,
            &mut engine,
            Command::ToggleOverlay(OverlayKind::Margins),
        ))
        .unwrap();
        assert_eq!(canvas.toggles.show_margins, !before);
    }

    #[test]
    fn test_nudge_persists_position() {
        let mut canvas = open_canvas();
        let mut engine = InteractionEngine::new();
        block_on(dispatch(
            &mut canvas,
            &mut engine,
            Command::AddElement(ElementKind::Text),
        ))
        .unwrap();
        let id = canvas.selection.selected().unwrap();

        block_on(dispatch(
            &mut canvas,
            &mut engine,
            Command::NudgeSelection {
                direction: NudgeDirection::Down,
                large: true,
            },
        ))
        .unwrap();

        assert_eq!(canvas.store.get(id).unwrap().position.y, 60.0);
        // The nudge went through commit, so it survives a refresh
        block_on(canvas.refresh()).unwrap();
        assert_eq!(canvas.store.get(id).unwrap().position.y, 60.0);
    }

    #[test]
    fn test_raise_selection_persists_layer() {
        let mut canvas = open_canvas();
        let mut engine = InteractionEngine::new();
        block_on(dispatch(
            &mut canvas,
            &mut engine,
            Command::AddElement(ElementKind::Shape),
        ))
        .unwrap();
        let id = canvas.selection.selected().unwrap();

        block_on(dispatch(&mut canvas, &mut engine, Command::RaiseSelection)).unwrap();
        block_on(canvas.refresh()).unwrap();
        assert_eq!(canvas.store.get(id).unwrap().layer, 1);
    }
}
