//! Element store: the authoritative in-memory element list for the open
//! template, kept consistent with the persistence adapter.
//!
//! Gestures mutate elements in two phases: `update_local` applies
//! optimistic per-frame patches for visual feedback, and the terminal
//! `commit` sends the final patch to the adapter. A failed commit keeps
//! the optimistic value; the next authoritative refresh reconciles.

use crate::document::CanvasDocument;
use crate::elements::{Element, ElementDraft, ElementId, ElementPatch};
use crate::persistence::{PersistenceAdapter, PersistenceError, PersistenceResult};

pub struct ElementStore {
    adapter: Box<dyn PersistenceAdapter>,
    template_id: Option<String>,
    document: CanvasDocument,
}

impl ElementStore {
    pub fn new(adapter: Box<dyn PersistenceAdapter>) -> Self {
        Self {
            adapter,
            template_id: None,
            document: CanvasDocument::default(),
        }
    }

    /// Whether a template is currently open.
    pub fn is_open(&self) -> bool {
        self.template_id.is_some()
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    /// The working document. Empty placeholder when no template is open.
    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.document.get(id)
    }

    /// Fetch and replace the working document for a template.
    pub async fn open(&mut self, template_id: &str) -> PersistenceResult<()> {
        let document = self.adapter.fetch_document(template_id).await?;
        log::info!(
            "opened template {template_id} with {} elements",
            document.len()
        );
        self.template_id = Some(template_id.to_string());
        self.document = document;
        Ok(())
    }

    /// Discard the working document on template deselection. Elements
    /// are not deleted remotely.
    pub fn close(&mut self) {
        self.template_id = None;
        self.document = CanvasDocument::default();
    }

    /// Re-fetch the authoritative document, reconciling any optimistic
    /// local state and external patches (e.g. from the property panel).
    pub async fn refresh(&mut self) -> PersistenceResult<()> {
        let template_id = self
            .template_id
            .clone()
            .ok_or(PersistenceError::NoTemplate)?;
        self.document = self.adapter.fetch_document(&template_id).await?;
        Ok(())
    }

    /// Create an element from a draft. The adapter assigns the id; the
    /// returned element is inserted into the working document.
    pub async fn add(&mut self, draft: ElementDraft) -> PersistenceResult<Element> {
        let template_id = self
            .template_id
            .clone()
            .ok_or(PersistenceError::NoTemplate)?;
        let element = self.adapter.create_element(&template_id, draft).await?;
        log::debug!("created {} element {}", element.name, element.id);
        self.document.insert(element.clone());
        Ok(element)
    }

    /// Apply a patch to the in-memory copy only. Used per-frame during
    /// gestures; idempotent, last write wins. Returns false when the
    /// element is gone (concurrent delete).
    pub fn update_local(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        match self.document.get_mut(id) {
            Some(element) => {
                patch.apply(element);
                true
            }
            None => false,
        }
    }

    /// Send a patch to the adapter. On success the returned element
    /// replaces the local copy; on failure the optimistic local value
    /// stays in place.
    pub async fn commit(&mut self, id: ElementId, patch: ElementPatch) -> PersistenceResult<()> {
        match self.adapter.update_element(id, patch).await {
            Ok(element) => {
                if let Some(local) = self.document.get_mut(id) {
                    *local = element;
                }
                Ok(())
            }
            Err(err) => {
                log::warn!("commit for element {id} failed: {err}");
                Err(err)
            }
        }
    }

    /// Delete an element remotely and locally.
    pub async fn remove(&mut self, id: ElementId) -> PersistenceResult<()> {
        self.adapter.delete_element(id).await?;
        self.document.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ElementKind;
    use crate::persistence::{MemoryAdapter, block_on};
    use kurbo::Point;

    fn open_store() -> ElementStore {
        let adapter = MemoryAdapter::new().with_document("t1", CanvasDocument::default());
        let mut store = ElementStore::new(Box::new(adapter));
        block_on(store.open("t1")).unwrap();
        store
    }

    #[test]
    fn test_add_requires_open_template() {
        let mut store = ElementStore::new(Box::new(MemoryAdapter::new()));
        let result = block_on(store.add(ElementDraft::for_kind(ElementKind::Text)));
        assert!(matches!(result, Err(PersistenceError::NoTemplate)));
    }

    #[test]
    fn test_add_inserts_server_element() {
        let mut store = open_store();
        let element = block_on(store.add(ElementDraft::for_kind(ElementKind::Text))).unwrap();
        assert_eq!(store.document().len(), 1);
        assert!(store.get(element.id).is_some());
    }

    #[test]
    fn test_update_local_only_touches_memory() {
        let mut store = open_store();
        let element = block_on(store.add(ElementDraft::for_kind(ElementKind::Text))).unwrap();

        assert!(store.update_local(element.id, &ElementPatch::position(Point::new(1.0, 2.0))));
        assert!(store.update_local(element.id, &ElementPatch::position(Point::new(9.0, 9.0))));
        // Last write wins
        assert_eq!(store.get(element.id).unwrap().position, Point::new(9.0, 9.0));

        // The remote copy is untouched until commit
        block_on(store.refresh()).unwrap();
        assert_eq!(
            store.get(element.id).unwrap().position,
            ElementKind::Text.default_position()
        );
    }

    #[test]
    fn test_update_local_missing_element() {
        let mut store = open_store();
        assert!(!store.update_local(uuid::Uuid::new_v4(), &ElementPatch::default()));
    }

    #[test]
    fn test_commit_supersedes_local_updates() {
        let mut store = open_store();
        let element = block_on(store.add(ElementDraft::for_kind(ElementKind::Text))).unwrap();

        store.update_local(element.id, &ElementPatch::position(Point::new(30.0, 30.0)));
        block_on(store.commit(element.id, ElementPatch::position(Point::new(40.0, 40.0)))).unwrap();

        assert_eq!(store.get(element.id).unwrap().position, Point::new(40.0, 40.0));
        block_on(store.refresh()).unwrap();
        assert_eq!(store.get(element.id).unwrap().position, Point::new(40.0, 40.0));
    }

    #[test]
    fn test_failed_commit_keeps_optimistic_value() {
        use std::sync::Arc;

        let adapter =
            Arc::new(MemoryAdapter::new().with_document("t1", CanvasDocument::default()));
        let mut store = ElementStore::new(Box::new(adapter.clone()));
        block_on(store.open("t1")).unwrap();
        let element = block_on(store.add(ElementDraft::for_kind(ElementKind::Text))).unwrap();

        store.update_local(element.id, &ElementPatch::position(Point::new(77.0, 77.0)));

        adapter.fail_next();
        let result = block_on(store.commit(element.id, ElementPatch::position(Point::new(77.0, 77.0))));
        assert!(matches!(result, Err(PersistenceError::Network(_))));

        // The optimistic position survives the failed commit
        assert_eq!(store.get(element.id).unwrap().position, Point::new(77.0, 77.0));
    }

    #[test]
    fn test_remove_deletes_locally_and_remotely() {
        let mut store = open_store();
        let element = block_on(store.add(ElementDraft::for_kind(ElementKind::Text))).unwrap();

        block_on(store.remove(element.id)).unwrap();
        assert!(store.document().is_empty());
        block_on(store.refresh()).unwrap();
        assert!(store.document().is_empty());
    }

    #[test]
    fn test_close_discards_document() {
        let mut store = open_store();
        block_on(store.add(ElementDraft::for_kind(ElementKind::Text))).unwrap();
        store.close();
        assert!(!store.is_open());
        assert!(store.document().is_empty());
    }
}
