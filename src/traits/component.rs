//! Core component trait - the foundation of the component system
//!
//! Every component that can be rendered implements `Component`.
//! This trait provides identity and rendering to the markup tree.

use crate::markup::Element;

/// Identity of a component type
///
/// Used for:
/// - Base class lookup (the first class on the component's root)
/// - The CLI `render` command
/// - Guarding against class-name collisions between components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Button,
    Badge,
    Card,
    Input,
    Kbd,
    Spinner,
    Dots,
    ProgressBar,
    Menu,
    Tabs,
    Modal,
    Toast,
    ToastContainer,
    DropZone,
    LogContainer,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 15] = [
        Self::Button,
        Self::Badge,
        Self::Card,
        Self::Input,
        Self::Kbd,
        Self::Spinner,
        Self::Dots,
        Self::ProgressBar,
        Self::Menu,
        Self::Tabs,
        Self::Modal,
        Self::Toast,
        Self::ToastContainer,
        Self::DropZone,
        Self::LogContainer,
    ];

    /// Class every instance's root element carries
    pub fn base_class(self) -> &'static str {
        match self {
            Self::Button => "btn",
            Self::Badge => "badge",
            Self::Card => "card",
            Self::Input => "input",
            Self::Kbd => "kbd",
            Self::Spinner => "spinner",
            Self::Dots => "dots",
            Self::ProgressBar => "progress",
            Self::Menu => "menu",
            Self::Tabs => "tabs",
            // The modal root is its backdrop
            Self::Modal => "modal-backdrop",
            Self::Toast => "toast",
            Self::ToastContainer => "toast-container",
            Self::DropZone => "dropzone",
            Self::LogContainer => "log-container",
        }
    }

    /// Kebab-case name as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Badge => "badge",
            Self::Card => "card",
            Self::Input => "input",
            Self::Kbd => "kbd",
            Self::Spinner => "spinner",
            Self::Dots => "dots",
            Self::ProgressBar => "progress-bar",
            Self::Menu => "menu",
            Self::Tabs => "tabs",
            Self::Modal => "modal",
            Self::Toast => "toast",
            Self::ToastContainer => "toast-container",
            Self::DropZone => "dropzone",
            Self::LogContainer => "log-container",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Base trait for all components
///
/// A component is anything that can describe itself as markup.
/// This is the minimum contract - stateful components also implement
/// `Interactive` and, when they listen on the document,
/// `host::DocumentListener`.
///
/// # Example
///
/// ```ignore
/// struct Chip {
///     label: String,
/// }
///
/// impl Component for Chip {
///     fn kind(&self) -> ComponentKind {
///         ComponentKind::Badge
///     }
///
///     fn render(&self) -> Element {
///         Element::new("span").class("badge").child(self.label.as_str())
///     }
/// }
/// ```
pub trait Component {
    /// What kind of component this is
    fn kind(&self) -> ComponentKind;

    /// Describe the current state as a markup tree
    ///
    /// Rendering is pure: it never changes component state.
    fn render(&self) -> Element;
}
