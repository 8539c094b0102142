//! Interactive trait for components that handle keyboard input
//!
//! Components that can receive and process keyboard events implement
//! this trait. The host routes input to the focused component.

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the host whether the component consumed the event or
/// if it should bubble up for global handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    /// Create from a boolean (true = handled)
    pub fn from_bool(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }

    /// Check if the event was handled
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        Self::from_bool(handled)
    }
}

/// Trait for components that handle keyboard input
///
/// # Event Flow
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// Document listeners (Escape on an open Modal / Menu)
///    │
///    │ if not handled
///    ▼
/// Focused component (via Interactive trait)
///    │
///    │ returns Handled::Yes or Handled::No
///    ▼
/// Host (fallback handlers)
/// ```
pub trait Interactive: Component {
    /// Handle a key event delivered to the component's own element
    ///
    /// Returns `Handled::Yes` if the component consumed the event,
    /// `Handled::No` if it should bubble up to the host.
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Hint text shown by hosts while this component has focus
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
