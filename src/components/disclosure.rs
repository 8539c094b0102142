//! Disclosure state and roving focus
//!
//! The open/closed + focused-index pair shared by Menu and other
//! trigger-revealed widgets, and the circular focus arithmetic shared by
//! Menu (vertical) and Tabs (horizontal).

use crossterm::event::KeyCode;

/// Open/closed state with a roving focus position
///
/// Invariant: a focus position exists only while open. Closing always
/// clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disclosure {
    is_open: bool,
    focused: Option<usize>,
}

impl Disclosure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    /// Open with an initial focus position
    pub fn open(&mut self, focus: Option<usize>) {
        self.is_open = true;
        self.focused = focus;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.focused = None;
    }

    /// Move focus; ignored while closed
    pub fn set_focused(&mut self, index: Option<usize>) {
        if self.is_open {
            self.focused = index;
        }
    }
}

/// Axis a roving-focus group is laid out on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Arrow-Up / Arrow-Down (menus)
    Vertical,
    /// Arrow-Left / Arrow-Right (tab lists)
    Horizontal,
}

/// A focus movement requested by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    Next,
    Prev,
    First,
    Last,
}

impl FocusMove {
    /// Map a key to a movement along `orientation`
    pub fn from_key(code: KeyCode, orientation: Orientation) -> Option<Self> {
        match (code, orientation) {
            (KeyCode::Down, Orientation::Vertical) | (KeyCode::Right, Orientation::Horizontal) => {
                Some(Self::Next)
            }
            (KeyCode::Up, Orientation::Vertical) | (KeyCode::Left, Orientation::Horizontal) => {
                Some(Self::Prev)
            }
            (KeyCode::Home, _) => Some(Self::First),
            (KeyCode::End, _) => Some(Self::Last),
            _ => None,
        }
    }

    /// Apply to a position among `len` focusable items, wrapping at the ends
    ///
    /// With no current position, Next lands on the first item and Prev on
    /// the last. Returns `None` only when there is nothing to focus.
    pub fn apply(self, current: Option<usize>, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let last = len - 1;
        let target = match (self, current) {
            (Self::Next, Some(i)) if i < last => i + 1,
            (Self::Next, _) => 0,
            (Self::Prev, Some(i)) if i > 0 && i <= last => i - 1,
            (Self::Prev, _) => last,
            (Self::First, _) => 0,
            (Self::Last, _) => last,
        };
        Some(target)
    }
}
