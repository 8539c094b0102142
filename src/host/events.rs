// Input events delivered to components
//
// Keyboard input reuses crossterm's KeyEvent so the same handlers serve the
// terminal gallery and tests. Pointer and drag events carry node ids
// instead of element references.

use crate::components::dropzone::FileHandle;
use crate::markup::NodeId;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A pointer press or click
///
/// `path` is the propagation path: the target first, then each ancestor up
/// to the root. Containment checks look at the whole path; "did the user
/// click exactly this element" checks look at the target only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    path: Vec<NodeId>,
}

impl PointerEvent {
    /// Event whose target is `target` with the given ancestors (nearest first)
    pub fn new(target: NodeId, ancestors: impl IntoIterator<Item = NodeId>) -> Self {
        let mut path = vec![target];
        path.extend(ancestors);
        Self { path }
    }

    /// Event on a node with no known ancestors
    pub fn on(target: NodeId) -> Self {
        Self { path: vec![target] }
    }

    pub fn target(&self) -> NodeId {
        self.path[0]
    }

    /// Whether the event passed through `node` while propagating
    pub fn passes_through(&self, node: NodeId) -> bool {
        self.path.contains(&node)
    }

    pub fn path(&self) -> &[NodeId] {
        &self.path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Enter,
    Over,
    Leave,
    Drop,
}

/// A drag-and-drop event as seen by the zone's root handler
#[derive(Debug, Clone)]
pub struct DragEvent {
    pub kind: DragKind,
    /// The element the event was dispatched to (may be a descendant)
    pub target: NodeId,
    /// Files carried by the drag; only meaningful for `Drop`
    pub files: Vec<FileHandle>,
}

impl DragEvent {
    pub fn new(kind: DragKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            files: Vec::new(),
        }
    }

    pub fn drop_files(target: NodeId, files: Vec<FileHandle>) -> Self {
        Self {
            kind: DragKind::Drop,
            target,
            files,
        }
    }
}

/// Events delivered to document-level subscribers
#[derive(Debug, Clone)]
pub enum DocumentEvent {
    PointerDown(PointerEvent),
    Key(KeyEvent),
}

/// Shorthand for a key press with no modifiers
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Enter or Space: standard activation keys for buttons
pub fn is_activation(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Char(' '))
}
