//! Scrollable trait for components with a scroll position
//!
//! Components that display more content than fits in their viewport
//! implement this trait to get uniform scroll behavior.

use super::Component;
use crate::components::scroll::ScrollState;

/// Trait for components with scrollable content
///
/// Components own their `ScrollState` and expose it through this trait.
/// Most methods have default implementations that delegate to it.
pub trait Scrollable: Component {
    /// Get immutable reference to scroll state
    fn scroll_state(&self) -> &ScrollState;

    /// Get mutable reference to scroll state
    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    /// Scroll up by one line
    fn scroll_up(&mut self) {
        self.scroll_state_mut().scroll_up();
    }

    /// Scroll down by one line
    fn scroll_down(&mut self) {
        self.scroll_state_mut().scroll_down();
    }

    /// Jump to the top of content
    fn scroll_to_top(&mut self) {
        self.scroll_state_mut().scroll_to_top();
    }

    /// Jump to the bottom of content
    fn scroll_to_bottom(&mut self) {
        self.scroll_state_mut().scroll_to_bottom();
    }

    /// Get the visible range of rows (start_index, end_index)
    fn visible_range(&self) -> (usize, usize) {
        self.scroll_state().visible_range()
    }

    /// Get current scroll offset
    fn scroll_offset(&self) -> usize {
        self.scroll_state().offset()
    }
}
