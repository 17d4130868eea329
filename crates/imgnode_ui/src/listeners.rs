//! Window-level listener registry.
//!
//! Some interactions (a drag that starts on a small handle) need to keep
//! receiving pointer events after the pointer leaves the element that started
//! them. Those listeners are attached to the hub rather than to an element.
//! Every registration returns a [`ListenerHandle`]; dropping the handle detaches
//! the listener, so a listener can never outlive its owner.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::{Event, EventKind};

struct Listener {
    id: u64,
    kind: EventKind,
    active: Cell<bool>,
    f: Box<dyn Fn(&Event)>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Rc<Listener>>,
}

/// Shared registry of window-level listeners.
///
/// Cloning the hub yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct EventHub {
    registry: Rc<RefCell<Registry>>,
}

impl EventHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener for one kind of event.
    pub fn listen<F>(&self, kind: EventKind, f: F) -> ListenerHandle
    where
        F: Fn(&Event) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let listener = Rc::new(Listener {
            id: registry.next_id,
            kind,
            active: Cell::new(true),
            f: Box::new(f),
        });
        registry.listeners.push(Rc::clone(&listener));
        log::trace!("Attached {:?} listener #{}", kind, listener.id);

        ListenerHandle {
            listener,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver an event to every listener attached for its kind.
    ///
    /// Listeners may attach or detach listeners (including themselves) while
    /// being called. A listener detached during dispatch is skipped.
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &Event) -> usize {
        let kind = event.kind();
        let matching: Vec<Rc<Listener>> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .cloned()
            .collect();

        let mut invoked = 0;
        for listener in matching {
            if listener.active.get() {
                (listener.f)(event);
                invoked += 1;
            }
        }
        invoked
    }

    /// Total number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Number of attached listeners for one kind of event
    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Ownership of one attached listener. Detaches on drop.
pub struct ListenerHandle {
    listener: Rc<Listener>,
    registry: Weak<RefCell<Registry>>,
}

impl ListenerHandle {
    /// The event kind this listener is attached for.
    pub fn kind(&self) -> EventKind {
        self.listener.kind
    }

    /// Detach now. Equivalent to dropping the handle.
    pub fn detach(self) {}
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.listener.active.set(false);
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|item| !Rc::ptr_eq(item, &self.listener));
            log::trace!(
                "Detached {:?} listener #{}",
                self.listener.kind,
                self.listener.id
            );
        }
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("id", &self.listener.id)
            .field("kind", &self.listener.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    fn moved(x: f32) -> Event {
        Event::PointerMove {
            position: Point::new(x, 0.0),
        }
    }

    #[test]
    fn test_dispatch_reaches_matching_kind_only() {
        let hub = EventHub::new();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        let _move = hub.listen(EventKind::PointerMove, move |_| {
            counter.set(counter.get() + 1)
        });
        let _up = hub.listen(EventKind::PointerUp, |_| panic!("wrong kind"));

        assert_eq!(hub.dispatch(&moved(1.0)), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(hub.listener_count(), 2);
        assert_eq!(hub.listener_count_for(EventKind::PointerMove), 1);
    }

    #[test]
    fn test_drop_detaches() {
        let hub = EventHub::new();
        let handle = hub.listen(EventKind::PointerMove, |_| {});
        assert_eq!(hub.listener_count(), 1);

        drop(handle);
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.dispatch(&moved(1.0)), 0);
    }

    #[test]
    fn test_listener_can_detach_another_during_dispatch() {
        let hub = EventHub::new();
        let victim: Rc<RefCell<Option<ListenerHandle>>> = Rc::new(RefCell::new(None));
        let victim_hits = Rc::new(Cell::new(0));

        let slot = victim.clone();
        let _killer = hub.listen(EventKind::TouchEnd, move |_| {
            slot.borrow_mut().take();
        });

        let hits = victim_hits.clone();
        *victim.borrow_mut() = Some(hub.listen(EventKind::TouchEnd, move |_| {
            hits.set(hits.get() + 1)
        }));

        assert_eq!(hub.dispatch(&Event::TouchEnd), 1);
        assert_eq!(victim_hits.get(), 0);
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn test_handle_outliving_hub() {
        let hub = EventHub::new();
        let handle = hub.listen(EventKind::PointerLeave, |_| {});
        drop(hub);
        assert_eq!(handle.kind(), EventKind::PointerLeave);
        handle.detach();
    }
}
