//! Typed event channel between the canvas core and its chrome.
//!
//! Replaces ad-hoc named broadcasts with an explicit subscriber list so
//! every event and payload is a checked type.

use crate::elements::ElementId;

/// Events emitted by the canvas for surrounding chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasEvent {
    /// The working document was replaced (template opened or refreshed).
    DocumentReplaced,
    /// A new element was created and inserted.
    ElementAdded(ElementId),
    /// An element was deleted.
    ElementRemoved(ElementId),
    /// A persistence call failed; the message is user-presentable and
    /// non-fatal (a transient notification, not a blocking error).
    MutationFailed(String),
}

/// Subscriber list for canvas events.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn Fn(&CanvasEvent)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl Fn(&CanvasEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn emit(&self, event: CanvasEvent) {
        for subscriber in &self.subscribers {
            subscriber(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use uuid::Uuid;

    #[test]
    fn test_emit_reaches_all_subscribers() {
        let first: Rc<RefCell<Vec<CanvasEvent>>> = Rc::default();
        let second: Rc<RefCell<Vec<CanvasEvent>>> = Rc::default();

        let mut bus = EventBus::new();
        let sink = first.clone();
        bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        let sink = second.clone();
        bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let id = Uuid::new_v4();
        bus.emit(CanvasEvent::ElementAdded(id));

        assert_eq!(*first.borrow(), vec![CanvasEvent::ElementAdded(id)]);
        assert_eq!(*second.borrow(), vec![CanvasEvent::ElementAdded(id)]);
    }
}
