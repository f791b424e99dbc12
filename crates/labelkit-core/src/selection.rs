//! Single-selection tracking and layer ordering.

use crate::document::CanvasDocument;
use crate::elements::ElementId;

/// Notification published on selection changes, consumed by
/// collaborators outside the canvas (property panel, toolbar).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Selected(ElementId),
    Cleared,
}

/// Tracks the single active selection and notifies subscribers.
#[derive(Default)]
pub struct SelectionManager {
    selected: Option<ElementId>,
    subscribers: Vec<Box<dyn Fn(&SelectionEvent)>>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    /// Register a selection observer.
    pub fn subscribe(&mut self, subscriber: impl Fn(&SelectionEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn notify(&self, event: SelectionEvent) {
        for subscriber in &self.subscribers {
            subscriber(&event);
        }
    }

    /// Select an element. Subscribers are notified only on change.
    pub fn select(&mut self, id: ElementId) {
        if self.selected == Some(id) {
            return;
        }
        self.selected = Some(id);
        self.notify(SelectionEvent::Selected(id));
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        if self.selected.take().is_some() {
            self.notify(SelectionEvent::Cleared);
        }
    }

    /// Called when an element is deleted; clears the selection if it
    /// pointed at the deleted element.
    pub fn handle_removed(&mut self, id: ElementId) {
        if self.selected == Some(id) {
            self.clear();
        }
    }
}

/// New layer value for raising an element one step. Layers are relative
/// to the element's own value, not renumbered against siblings.
pub fn raised_layer(document: &CanvasDocument, id: ElementId) -> Option<i32> {
    document.get(id).map(|e| e.layer.saturating_add(1))
}

/// New layer value for lowering an element one step.
pub fn lowered_layer(document: &CanvasDocument, id: ElementId) -> Option<i32> {
    document.get(id).map(|e| e.layer.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementDraft, ElementKind};
    use std::cell::RefCell;
    use std::rc::Rc;
    use uuid::Uuid;

    #[test]
    fn test_select_and_clear_notify() {
        let events: Rc<RefCell<Vec<SelectionEvent>>> = Rc::default();
        let sink = events.clone();

        let mut selection = SelectionManager::new();
        selection.subscribe(move |event| sink.borrow_mut().push(*event));

        let id = Uuid::new_v4();
        selection.select(id);
        selection.select(id); // no change, no event
        selection.clear();
        selection.clear(); // already empty, no event

        assert_eq!(
            *events.borrow(),
            vec![SelectionEvent::Selected(id), SelectionEvent::Cleared]
        );
    }

    #[test]
    fn test_handle_removed_clears_only_matching() {
        let mut selection = SelectionManager::new();
        let id = Uuid::new_v4();
        selection.select(id);

        selection.handle_removed(Uuid::new_v4());
        assert_eq!(selection.selected(), Some(id));

        selection.handle_removed(id);
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_layer_steps_are_relative() {
        let mut document = CanvasDocument::default();
        let mut element = ElementDraft::for_kind(ElementKind::Text).into_element(Uuid::new_v4());
        element.layer = 5;
        let id = element.id;
        document.insert(element);

        assert_eq!(raised_layer(&document, id), Some(6));
        assert_eq!(lowered_layer(&document, id), Some(4));
        assert_eq!(raised_layer(&document, Uuid::new_v4()), None);
    }
}
