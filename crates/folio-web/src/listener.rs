#![forbid(unsafe_code)]

//! Scoped scroll/resize listener registration.
//!
//! A mounted page needs `scroll` and `resize` listeners on the window, and
//! must remove them when it unmounts no matter how the owner goes away
//! (explicit unmount, early return, panic unwinding). [`ListenerGuard`]
//! attaches both kinds on construction and detaches exactly those ids in
//! `Drop`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use folio_core::event::EventKind;

/// Host-assigned listener handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Anything listeners can be attached to (the window, in a browser).
pub trait EventTarget {
    /// Attach a listener for `kind` and return its handle.
    fn add_listener(&mut self, kind: EventKind) -> ListenerId;

    /// Detach a listener; unknown ids are ignored.
    fn remove_listener(&mut self, id: ListenerId);
}

impl<T: EventTarget + ?Sized> EventTarget for &mut T {
    fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        (**self).add_listener(kind)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        (**self).remove_listener(id);
    }
}

impl<T: EventTarget + ?Sized> EventTarget for Rc<RefCell<T>> {
    fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        self.borrow_mut().add_listener(kind)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.borrow_mut().remove_listener(id);
    }
}

/// In-memory event target for hosts without a DOM and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTarget {
    next_id: u64,
    live: BTreeMap<ListenerId, EventKind>,
}

impl MemoryTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of attached listeners of `kind`.
    #[must_use]
    pub fn live_of(&self, kind: EventKind) -> usize {
        self.live.values().filter(|k| **k == kind).count()
    }
}

impl EventTarget for MemoryTarget {
    fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.live.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.live.remove(&id);
    }
}

/// Holds the page's listeners; removes them on drop.
#[derive(Debug)]
pub struct ListenerGuard<T: EventTarget> {
    target: T,
    ids: Vec<ListenerId>,
}

impl<T: EventTarget> ListenerGuard<T> {
    /// Attach one listener per [`EventKind`].
    pub fn attach(mut target: T) -> Self {
        let ids = EventKind::ALL
            .iter()
            .map(|&kind| target.add_listener(kind))
            .collect::<Vec<_>>();
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "session.mount", listeners = ids.len());
        Self { target, ids }
    }

    /// Handles attached by this guard.
    #[must_use]
    pub fn ids(&self) -> &[ListenerId] {
        &self.ids
    }
}

impl<T: EventTarget> Drop for ListenerGuard<T> {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            self.target.remove_listener(id);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "session.unmount");
    }
}
