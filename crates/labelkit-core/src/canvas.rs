//! Runtime canvas state: store, camera, selection and view settings.

use crate::camera::Camera;
use crate::elements::{Element, ElementDraft, ElementId, ElementKind, ElementPatch};
use crate::events::{CanvasEvent, EventBus};
use crate::overlay::{self, DrawPrimitive, OverlayToggles};
use crate::persistence::{PersistenceAdapter, PersistenceResult};
use crate::selection::{self, SelectionManager};
use crate::snap::SnapMode;
use crate::store::ElementStore;
use kurbo::Size;

/// The canvas session for one open template.
///
/// Aggregates the element store with the transient view state. All
/// element mutations flow through the store; the canvas wires selection
/// and event notifications around them.
pub struct Canvas {
    pub store: ElementStore,
    pub camera: Camera,
    pub selection: SelectionManager,
    pub toggles: OverlayToggles,
    pub snap_mode: SnapMode,
    pub viewport_size: Size,
    pub events: EventBus,
}

impl Canvas {
    pub fn new(adapter: Box<dyn PersistenceAdapter>) -> Self {
        Self {
            store: ElementStore::new(adapter),
            camera: Camera::new(),
            selection: SelectionManager::new(),
            toggles: OverlayToggles::default(),
            snap_mode: SnapMode::default(),
            viewport_size: Size::new(800.0, 600.0),
            events: EventBus::new(),
        }
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// Open a template and fit it into the viewport. Load failures are
    /// returned to the caller, which owns the retry affordance.
    pub async fn open_template(&mut self, template_id: &str) -> PersistenceResult<()> {
        self.selection.clear();
        self.store.open(template_id).await?;
        self.zoom_to_document();
        self.events.emit(CanvasEvent::DocumentReplaced);
        Ok(())
    }

    /// Tear down the working document on template deselection.
    pub fn close_template(&mut self) {
        self.selection.clear();
        self.store.close();
        self.events.emit(CanvasEvent::DocumentReplaced);
    }

    /// Re-fetch the authoritative document, e.g. after external patches
    /// from the property panel.
    pub async fn refresh(&mut self) -> PersistenceResult<()> {
        self.store.refresh().await?;
        if let Some(id) = self.selection.selected() {
            if !self.store.document().contains(id) {
                self.selection.clear();
            }
        }
        self.events.emit(CanvasEvent::DocumentReplaced);
        Ok(())
    }

    /// Create an element with its per-type defaults and select it.
    pub async fn add_element(&mut self, kind: ElementKind) -> PersistenceResult<Element> {
        let draft = ElementDraft::for_kind(kind);
        match self.store.add(draft).await {
            Ok(element) => {
                self.selection.select(element.id);
                self.events.emit(CanvasEvent::ElementAdded(element.id));
                Ok(element)
            }
            Err(err) => {
                self.events.emit(CanvasEvent::MutationFailed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Delete the selected element, clearing the selection on success.
    pub async fn delete_selected(&mut self) -> PersistenceResult<()> {
        let Some(id) = self.selection.selected() else {
            return Ok(());
        };
        match self.store.remove(id).await {
            Ok(()) => {
                self.selection.handle_removed(id);
                self.events.emit(CanvasEvent::ElementRemoved(id));
                Ok(())
            }
            Err(err) => {
                self.events.emit(CanvasEvent::MutationFailed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Commit a patch, surfacing failures as a non-fatal notification.
    /// The optimistic local value stays either way.
    pub async fn commit_patch(&mut self, id: ElementId, patch: ElementPatch) -> PersistenceResult<()> {
        match self.store.commit(id, patch).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.events.emit(CanvasEvent::MutationFailed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Select an element. Ignored when the id is not in the document, so
    /// the selection invariant holds.
    pub fn select(&mut self, id: ElementId) {
        if self.store.document().contains(id) {
            self.selection.select(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Raise the selected element one layer. Returns the commit patch to
    /// persist the new layer value.
    pub fn raise_selected(&mut self) -> Option<(ElementId, ElementPatch)> {
        let id = self.selection.selected()?;
        let layer = selection::raised_layer(self.store.document(), id)?;
        let patch = ElementPatch::layer(layer);
        self.store.update_local(id, &patch);
        Some((id, patch))
    }

    /// Lower the selected element one layer.
    pub fn lower_selected(&mut self) -> Option<(ElementId, ElementPatch)> {
        let id = self.selection.selected()?;
        let layer = selection::lowered_layer(self.store.document(), id)?;
        let patch = ElementPatch::layer(layer);
        self.store.update_local(id, &patch);
        Some((id, patch))
    }

    /// Fit the document into the viewport.
    pub fn zoom_to_document(&mut self) {
        self.camera
            .zoom_to_document(self.viewport_size, self.store.document().size_px);
    }

    /// Fit all elements into the viewport, or the document when empty.
    pub fn zoom_to_objects(&mut self) {
        let content = self.store.document().content_bounds();
        self.camera
            .zoom_to_objects(self.viewport_size, content, self.store.document().size_px);
    }

    /// Render the overlay layers for the current view.
    pub fn overlay(&self) -> Vec<DrawPrimitive> {
        overlay::render(
            &self.camera,
            &self.toggles,
            &self.store.document().grid,
            self.store.document().size_px,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CanvasDocument;
    use crate::persistence::{MemoryAdapter, PersistenceAdapter, block_on};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn open_canvas() -> Canvas {
        let adapter = MemoryAdapter::new().with_document("t1", CanvasDocument::default());
        let mut canvas = Canvas::new(Box::new(adapter));
        block_on(canvas.open_template("t1")).unwrap();
        canvas
    }

    #[test]
    fn test_add_selects_new_element() {
        let mut canvas = open_canvas();
        let element = block_on(canvas.add_element(ElementKind::Text)).unwrap();
        assert_eq!(canvas.selection.selected(), Some(element.id));
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut canvas = open_canvas();
        block_on(canvas.add_element(ElementKind::Text)).unwrap();
        block_on(canvas.delete_selected()).unwrap();
        assert_eq!(canvas.selection.selected(), None);
        assert!(canvas.store.document().is_empty());
    }

    #[test]
    fn test_select_requires_present_element() {
        let mut canvas = open_canvas();
        canvas.select(uuid::Uuid::new_v4());
        assert_eq!(canvas.selection.selected(), None);
    }

    #[test]
    fn test_add_failure_emits_notification() {
        let mut canvas = Canvas::new(Box::new(MemoryAdapter::new()));
        let failures: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = failures.clone();
        canvas.events.subscribe(move |event| {
            if let CanvasEvent::MutationFailed(message) = event {
                sink.borrow_mut().push(message.clone());
            }
        });

        // No template open: add must fail and notify
        assert!(block_on(canvas.add_element(ElementKind::Text)).is_err());
        assert_eq!(failures.borrow().len(), 1);
    }

    #[test]
    fn test_refresh_reconciles_stale_selection() {
        use std::sync::Arc;

        let adapter =
            Arc::new(MemoryAdapter::new().with_document("t1", CanvasDocument::default()));
        let mut canvas = Canvas::new(Box::new(adapter.clone()));
        block_on(canvas.open_template("t1")).unwrap();
        let element = block_on(canvas.add_element(ElementKind::Text)).unwrap();

        // Concurrent delete through another client
        block_on(adapter.delete_element(element.id)).unwrap();

        block_on(canvas.refresh()).unwrap();
        assert_eq!(canvas.selection.selected(), None);
    }

    #[test]
    fn test_raise_and_lower_layer() {
        let mut canvas = open_canvas();
        let element = block_on(canvas.add_element(ElementKind::Text)).unwrap();

        let (id, patch) = canvas.raise_selected().unwrap();
        assert_eq!(id, element.id);
        assert_eq!(patch.layer, Some(1));
        assert_eq!(canvas.store.get(id).unwrap().layer, 1);

        let (_, patch) = canvas.lower_selected().unwrap();
        assert_eq!(patch.layer, Some(0));
    }
}
