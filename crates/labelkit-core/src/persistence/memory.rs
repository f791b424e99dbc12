//! In-memory persistence implementation.

use super::{BoxFuture, PersistenceAdapter, PersistenceError, PersistenceResult};
use crate::document::CanvasDocument;
use crate::elements::{Element, ElementDraft, ElementId, ElementPatch};
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

#[derive(Default)]
struct Registry {
    documents: HashMap<String, CanvasDocument>,
    /// Element id -> owning template id.
    element_index: HashMap<ElementId, String>,
}

/// In-memory persistence for tests and offline use. Assigns element ids
/// the way the real server does.
#[derive(Default)]
pub struct MemoryAdapter {
    registry: RwLock<Registry>,
    /// When set, the next mutating call fails with a network error.
    fail_next: AtomicBool,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a template document.
    pub fn with_document(self, template_id: &str, document: CanvasDocument) -> Self {
        {
            let mut registry = self.registry.write().expect("registry lock");
            for element in &document.elements {
                registry
                    .element_index
                    .insert(element.id, template_id.to_string());
            }
            registry.documents.insert(template_id.to_string(), document);
        }
        self
    }

    /// Make the next mutating call fail, for error-path tests.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn take_failure(&self) -> PersistenceResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            Err(PersistenceError::Network("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn fetch_document(
        &self,
        template_id: &str,
    ) -> BoxFuture<'_, PersistenceResult<CanvasDocument>> {
        let template_id = template_id.to_string();
        Box::pin(async move {
            let registry = self.registry.read().expect("registry lock");
            registry
                .documents
                .get(&template_id)
                .cloned()
                .ok_or(PersistenceError::NotFound(template_id))
        })
    }

    fn create_element(
        &self,
        template_id: &str,
        draft: ElementDraft,
    ) -> BoxFuture<'_, PersistenceResult<Element>> {
        let template_id = template_id.to_string();
        Box::pin(async move {
            self.take_failure()?;
            let mut guard = self.registry.write().expect("registry lock");
            let registry = &mut *guard;
            let Some(document) = registry.documents.get_mut(&template_id) else {
                return Err(PersistenceError::NotFound(template_id));
            };
            let element = draft.into_element(Uuid::new_v4());
            registry
                .element_index
                .insert(element.id, template_id.clone());
            document.insert(element.clone());
            Ok(element)
        })
    }

    fn update_element(
        &self,
        id: ElementId,
        patch: ElementPatch,
    ) -> BoxFuture<'_, PersistenceResult<Element>> {
        Box::pin(async move {
            self.take_failure()?;
            let mut registry = self.registry.write().expect("registry lock");
            let template_id = registry
                .element_index
                .get(&id)
                .cloned()
                .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
            let document = registry
                .documents
                .get_mut(&template_id)
                .ok_or(PersistenceError::NotFound(template_id.clone()))?;
            let element = document
                .get_mut(id)
                .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
            patch.apply(element);
            Ok(element.clone())
        })
    }

    fn delete_element(&self, id: ElementId) -> BoxFuture<'_, PersistenceResult<()>> {
        Box::pin(async move {
            self.take_failure()?;
            let mut registry = self.registry.write().expect("registry lock");
            let template_id = registry
                .element_index
                .remove(&id)
                .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
            if let Some(document) = registry.documents.get_mut(&template_id) {
                document.remove(id);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ElementKind;
    use crate::persistence::block_on;
    use kurbo::Point;

    fn seeded() -> MemoryAdapter {
        MemoryAdapter::new().with_document("t1", CanvasDocument::default())
    }

    #[test]
    fn test_fetch_missing_template() {
        let adapter = MemoryAdapter::new();
        let result = block_on(adapter.fetch_document("nope"));
        assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    }

    #[test]
    fn test_create_assigns_id_and_persists() {
        let adapter = seeded();
        let created = block_on(
            adapter.create_element("t1", ElementDraft::for_kind(ElementKind::Text)),
        )
        .unwrap();

        let document = block_on(adapter.fetch_document("t1")).unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(document.elements[0].id, created.id);
    }

    #[test]
    fn test_update_applies_patch() {
        let adapter = seeded();
        let created = block_on(
            adapter.create_element("t1", ElementDraft::for_kind(ElementKind::Text)),
        )
        .unwrap();

        let updated = block_on(
            adapter.update_element(created.id, ElementPatch::position(Point::new(5.0, 6.0))),
        )
        .unwrap();
        assert_eq!(updated.position, Point::new(5.0, 6.0));
    }

    #[test]
    fn test_delete_removes_element() {
        let adapter = seeded();
        let created = block_on(
            adapter.create_element("t1", ElementDraft::for_kind(ElementKind::Text)),
        )
        .unwrap();

        block_on(adapter.delete_element(created.id)).unwrap();
        let document = block_on(adapter.fetch_document("t1")).unwrap();
        assert!(document.is_empty());

        let result = block_on(adapter.delete_element(created.id));
        assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    }

    #[test]
    fn test_injected_failure() {
        let adapter = seeded();
        adapter.fail_next();
        let result = block_on(
            adapter.create_element("t1", ElementDraft::for_kind(ElementKind::Text)),
        );
        assert!(matches!(result, Err(PersistenceError::Network(_))));

        // Failure is one-shot
        let result = block_on(
            adapter.create_element("t1", ElementDraft::for_kind(ElementKind::Text)),
        );
        assert!(result.is_ok());
    }
}
