//! Host environment shared by the components of one tree
//!
//! `Host` stands in for the document: it keeps the registry of
//! document-level listeners, the body scroll lock, the element holding
//! input focus and the clock timers read from. It is a cheap clonable
//! handle; all clones see the same state. Everything runs on the UI
//! thread, so the state lives behind `Rc<RefCell<..>>`.
//!
//! Listeners and scroll locks are RAII guards. A component that holds one
//! releases it by dropping it, which happens on close, on a superseding
//! state change, or when the component itself is dropped (unmounted).

pub mod events;
pub mod timer;

pub use events::{DocumentEvent, DragEvent, DragKind, PointerEvent};
pub use timer::{Clock, ManualClock, OneShot, SystemClock};

use crate::markup::NodeId;
use crate::traits::Handled;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Body class present while at least one scroll lock is held
pub const SCROLL_LOCK_CLASS: &str = "modal-open";

/// Kinds of document-level listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    PointerDown,
    KeyDown,
}

#[derive(Debug, Default)]
struct HostState {
    next_listener: u64,
    listeners: BTreeMap<u64, ListenerKind>,
    scroll_locks: usize,
    body_classes: BTreeSet<String>,
    active_element: Option<NodeId>,
}

/// Handle to the host environment
#[derive(Clone)]
pub struct Host {
    state: Rc<RefCell<HostState>>,
    clock: Rc<dyn Clock>,
}

impl Host {
    /// Host driven by the monotonic system clock
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock::new()))
    }

    /// Host driven by a caller-provided clock (e.g. `ManualClock` in tests)
    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            state: Rc::new(RefCell::new(HostState::default())),
            clock,
        }
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    // ─────────────────────────────────────────────────────────────
    // Document listeners
    // ─────────────────────────────────────────────────────────────

    /// Register a document-level listener; dropping the guard removes it
    pub fn subscribe(&self, kind: ListenerKind) -> Subscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_listener;
        state.next_listener += 1;
        state.listeners.insert(id, kind);
        Subscription {
            host: Rc::downgrade(&self.state),
            id,
            kind,
        }
    }

    /// Number of live listeners of one kind
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|k| **k == kind)
            .count()
    }

    /// Number of live listeners of any kind
    pub fn total_listeners(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    // ─────────────────────────────────────────────────────────────
    // Scroll lock
    // ─────────────────────────────────────────────────────────────

    /// Lock body scrolling until the returned guard is dropped
    ///
    /// Locks are counted: the body class stays while any guard is alive.
    pub fn lock_scroll(&self) -> ScrollLock {
        let mut state = self.state.borrow_mut();
        state.scroll_locks += 1;
        state.body_classes.insert(SCROLL_LOCK_CLASS.to_string());
        ScrollLock {
            host: Rc::downgrade(&self.state),
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.state.borrow().scroll_locks > 0
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.state.borrow().body_classes.contains(class)
    }

    // ─────────────────────────────────────────────────────────────
    // Input focus
    // ─────────────────────────────────────────────────────────────

    /// Move input focus to `node`
    pub fn focus(&self, node: NodeId) {
        self.state.borrow_mut().active_element = Some(node);
    }

    /// Drop focus if `node` currently holds it
    pub fn blur(&self, node: NodeId) {
        let mut state = self.state.borrow_mut();
        if state.active_element == Some(node) {
            state.active_element = None;
        }
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.state.borrow().active_element
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("state", &self.state.borrow())
            .field("now", &self.now())
            .finish()
    }
}

/// A live document-level listener registration
#[derive(Debug)]
pub struct Subscription {
    host: Weak<RefCell<HostState>>,
    id: u64,
    kind: ListenerKind,
}

impl Subscription {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.host.upgrade() {
            state.borrow_mut().listeners.remove(&self.id);
        }
    }
}

/// A held body scroll lock
#[derive(Debug)]
pub struct ScrollLock {
    host: Weak<RefCell<HostState>>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        if let Some(state) = self.host.upgrade() {
            let mut state = state.borrow_mut();
            state.scroll_locks = state.scroll_locks.saturating_sub(1);
            if state.scroll_locks == 0 {
                state.body_classes.remove(SCROLL_LOCK_CLASS);
            }
        }
    }
}

/// Components that react to document-level events while subscribed
///
/// The host application forwards every document event to each listener;
/// a component ignores events unless it currently holds a subscription of
/// the matching kind.
pub trait DocumentListener {
    fn on_document_event(&mut self, event: &DocumentEvent) -> Handled;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_drop_unregisters() {
        let host = Host::new();
        let pointer = host.subscribe(ListenerKind::PointerDown);
        let key = host.subscribe(ListenerKind::KeyDown);
        assert_eq!(host.total_listeners(), 2);
        assert_eq!(host.listener_count(ListenerKind::KeyDown), 1);

        drop(pointer);
        assert_eq!(host.listener_count(ListenerKind::PointerDown), 0);
        assert_eq!(host.total_listeners(), 1);

        drop(key);
        assert_eq!(host.total_listeners(), 0);
    }

    #[test]
    fn test_scroll_lock_is_counted() {
        let host = Host::new();
        let first = host.lock_scroll();
        let second = host.lock_scroll();
        assert!(host.has_body_class(SCROLL_LOCK_CLASS));

        drop(first);
        assert!(host.is_scroll_locked());

        drop(second);
        assert!(!host.is_scroll_locked());
        assert!(!host.has_body_class(SCROLL_LOCK_CLASS));
    }

    #[test]
    fn test_guards_outliving_host_are_harmless() {
        let host = Host::new();
        let sub = host.subscribe(ListenerKind::KeyDown);
        let lock = host.lock_scroll();
        drop(host);
        drop(sub);
        drop(lock);
    }

    #[test]
    fn test_blur_only_clears_matching_focus() {
        let host = Host::new();
        let a = NodeId::next();
        let b = NodeId::next();
        host.focus(a);
        host.blur(b);
        assert_eq!(host.active_element(), Some(a));
        host.blur(a);
        assert_eq!(host.active_element(), None);
    }
}
