//! Persistence abstraction for the remote template/element store.

mod http;
mod memory;

pub use http::HttpAdapter;
pub use memory::MemoryAdapter;

use crate::document::CanvasDocument;
use crate::elements::{Element, ElementDraft, ElementId, ElementPatch};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Persistence errors surfaced to the user.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("no template is open")]
    NoTemplate,
    #[error("network error: {0}")]
    Network(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Boxed future for async adapter operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for the remote object store backing the element store.
///
/// All calls are request/response; element ids are assigned by the
/// implementation on creation, never by the caller.
pub trait PersistenceAdapter: Send + Sync {
    /// Fetch the full document for a template.
    fn fetch_document(&self, template_id: &str)
        -> BoxFuture<'_, PersistenceResult<CanvasDocument>>;

    /// Create an element in a template. Returns the stored element with
    /// its assigned id.
    fn create_element(
        &self,
        template_id: &str,
        draft: ElementDraft,
    ) -> BoxFuture<'_, PersistenceResult<Element>>;

    /// Apply a partial update to an element. Returns the updated element.
    fn update_element(
        &self,
        id: ElementId,
        patch: ElementPatch,
    ) -> BoxFuture<'_, PersistenceResult<Element>>;

    /// Delete an element.
    fn delete_element(&self, id: ElementId) -> BoxFuture<'_, PersistenceResult<()>>;
}

impl<A: PersistenceAdapter + ?Sized> PersistenceAdapter for std::sync::Arc<A> {
    fn fetch_document(
        &self,
        template_id: &str,
    ) -> BoxFuture<'_, PersistenceResult<CanvasDocument>> {
        self.as_ref().fetch_document(template_id)
    }

    fn create_element(
        &self,
        template_id: &str,
        draft: ElementDraft,
    ) -> BoxFuture<'_, PersistenceResult<Element>> {
        self.as_ref().create_element(template_id, draft)
    }

    fn update_element(
        &self,
        id: ElementId,
        patch: ElementPatch,
    ) -> BoxFuture<'_, PersistenceResult<Element>> {
        self.as_ref().update_element(id, patch)
    }

    fn delete_element(&self, id: ElementId) -> BoxFuture<'_, PersistenceResult<()>> {
        self.as_ref().delete_element(id)
    }
}

/// Drive a future to completion on the current thread. Test-only; the
/// adapters used in tests never actually suspend.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
