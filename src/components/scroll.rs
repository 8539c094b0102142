// Scroll position for components with a viewport
//
// Owns everything needed to reason about scrolling: position, content
// size, viewport size. It never moves on its own; the owning component
// decides when to jump (LogContainer jumps to the bottom only when its
// entry count grows).

/// Scroll state for a single viewport
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Current scroll offset (row index at top of viewport)
    offset: usize,

    /// Total number of rows in content
    total: usize,

    /// Number of rows visible in viewport
    viewport: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content and viewport dimensions, clamping the offset
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the content size only
    pub fn set_total(&mut self, total: usize) {
        self.update_dimensions(total, self.viewport);
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Jump to the maximum offset
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Maximum valid offset
    pub fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_growth_does_not_move_offset() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);

        scroll.set_total(15);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_scroll_to_bottom() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset(), 15);
        assert!(scroll.is_at_bottom());

        scroll.scroll_up();
        assert!(!scroll.is_at_bottom());
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(100, 10);
        scroll.scroll_to_bottom();
        scroll.set_total(12);
        assert_eq!(scroll.offset(), 2);
    }

    #[test]
    fn test_visible_range() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(100, 10);
        scroll.scroll_to_bottom();
        assert_eq!(scroll.visible_range(), (90, 100));

        scroll.scroll_to_top();
        assert_eq!(scroll.visible_range(), (0, 10));
    }

    #[test]
    fn test_paging_stays_in_bounds() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(23, 10);
        scroll.page_down();
        scroll.page_down();
        assert_eq!(scroll.offset(), 13);
        scroll.page_up();
        scroll.page_up();
        assert_eq!(scroll.offset(), 0);
    }
}
