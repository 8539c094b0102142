//! Modal component
//!
//! Visibility belongs to the host: the modal never opens or closes itself,
//! it only asks for closure through `on_close`. While open it holds a body
//! scroll lock and a document key-down subscription for Escape. Both are
//! guards stored on the modal, so every exit path (closing, dropping while
//! open) releases them.

use crate::host::{DocumentEvent, DocumentListener, Host, ListenerKind, PointerEvent, ScrollLock, Subscription};
use crate::markup::{class_names, Element, Node, NodeId, NodeRef};
use crate::traits::{Component, ComponentKind, Handled};
use crossterm::event::KeyCode;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalSize {
    Sm,
    #[default]
    Default,
    Lg,
    Xl,
    Fullscreen,
}

impl ModalSize {
    fn class(self) -> &'static str {
        match self {
            Self::Sm => "modal-sm",
            Self::Default => "",
            Self::Lg => "modal-lg",
            Self::Xl => "modal-xl",
            Self::Fullscreen => "modal-fullscreen",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FooterAlign {
    Left,
    Center,
    #[default]
    Right,
    Between,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parts
// ─────────────────────────────────────────────────────────────────────────────

pub fn header() -> Element {
    Element::new("div").class("modal-header")
}

/// Title heading, `h2` unless a level is given
pub fn title(text: impl Into<String>) -> Element {
    title_as(2, text)
}

pub fn title_as(level: u8, text: impl Into<String>) -> Element {
    let level = level.clamp(1, 6);
    Element::new(format!("h{level}"))
        .class("modal-title")
        .child(Node::text(text))
}

pub fn body() -> Element {
    Element::new("div").class("modal-body")
}

pub fn footer(align: FooterAlign) -> Element {
    let align_class = match align {
        FooterAlign::Left => "modal-footer-left",
        FooterAlign::Center => "modal-footer-center",
        FooterAlign::Right => "",
        FooterAlign::Between => "modal-footer-between",
    };
    Element::new("div").class(&class_names(&["modal-footer", align_class]))
}

// ─────────────────────────────────────────────────────────────────────────────
// Modal
// ─────────────────────────────────────────────────────────────────────────────

pub struct Modal {
    host: Host,
    backdrop: NodeId,
    dialog: NodeId,
    close_button: NodeId,
    open: bool,
    size: ModalSize,
    close_on_backdrop_click: bool,
    close_on_escape: bool,
    class: String,
    content: Vec<Node>,
    on_close: Box<dyn FnMut()>,
    scroll_lock: Option<ScrollLock>,
    escape_listener: Option<Subscription>,
}

impl Modal {
    /// A closed modal reporting close requests to `on_close`
    pub fn new(host: &Host, on_close: impl FnMut() + 'static) -> Self {
        Self {
            host: host.clone(),
            backdrop: NodeId::next(),
            dialog: NodeId::next(),
            close_button: NodeId::next(),
            open: false,
            size: ModalSize::default(),
            close_on_backdrop_click: true,
            close_on_escape: true,
            class: String::new(),
            content: Vec::new(),
            on_close: Box::new(on_close),
            scroll_lock: None,
            escape_listener: None,
        }
    }

    pub fn size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }

    pub fn close_on_backdrop_click(mut self, enabled: bool) -> Self {
        self.close_on_backdrop_click = enabled;
        self
    }

    pub fn close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// The dialog element is the one exposed to callers
    pub fn with_node_ref(self, node_ref: &NodeRef) -> Self {
        node_ref.attach(self.dialog);
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.content.push(child.into());
        self
    }

    pub fn set_content(&mut self, content: Vec<Node>) {
        self.content = content;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn backdrop_node(&self) -> NodeId {
        self.backdrop
    }

    pub fn dialog_node(&self) -> NodeId {
        self.dialog
    }

    pub fn close_button_node(&self) -> NodeId {
        self.close_button
    }

    /// Apply the host's `open` value
    pub fn set_open(&mut self, open: bool) {
        if open == self.open {
            return;
        }
        self.open = open;
        if open {
            self.scroll_lock = Some(self.host.lock_scroll());
            self.escape_listener = Some(self.host.subscribe(ListenerKind::KeyDown));
            debug!(modal = self.dialog.raw(), "modal opened, scroll locked");
        } else {
            self.scroll_lock = None;
            self.escape_listener = None;
            debug!(modal = self.dialog.raw(), "modal closed, scroll released");
        }
    }

    fn request_close(&mut self) {
        debug!(modal = self.dialog.raw(), "modal close requested");
        (self.on_close)();
    }

    /// Click dispatched to the backdrop element
    ///
    /// Only a click whose original target is the backdrop itself counts;
    /// clicks bubbling up from the dialog are ignored.
    pub fn on_backdrop_click(&mut self, event: &PointerEvent) -> Handled {
        if self.open && self.close_on_backdrop_click && event.target() == self.backdrop {
            self.request_close();
            return Handled::Yes;
        }
        Handled::No
    }

    /// Click on the close button part
    pub fn on_close_click(&mut self) {
        if self.open {
            self.request_close();
        }
    }

    /// Close button bound to this modal
    pub fn close_button(&self) -> Element {
        Element::new("button")
            .node(self.close_button)
            .class("modal-close")
            .attr("type", "button")
            .attr("aria-label", "Close modal")
            .child("×")
    }
}

impl std::fmt::Debug for Modal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modal")
            .field("dialog", &self.dialog)
            .field("open", &self.open)
            .field("size", &self.size)
            .field("scroll_locked", &self.scroll_lock.is_some())
            .finish_non_exhaustive()
    }
}

impl Component for Modal {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Modal
    }

    fn render(&self) -> Element {
        Element::new("div")
            .node(self.backdrop)
            .class(&class_names(&["modal-backdrop", if self.open { "open" } else { "" }]))
            .attr("role", "presentation")
            .attr("aria-hidden", (!self.open).to_string())
            .child(
                Element::new("div")
                    .node(self.dialog)
                    .class(&class_names(&["modal", self.size.class(), &self.class]))
                    .attr("role", "dialog")
                    .attr("aria-modal", "true")
                    .children(self.content.iter().cloned()),
            )
    }
}

impl DocumentListener for Modal {
    fn on_document_event(&mut self, event: &DocumentEvent) -> Handled {
        if self.escape_listener.is_none() {
            return Handled::No;
        }
        match event {
            DocumentEvent::Key(key) if key.code == KeyCode::Esc && self.close_on_escape => {
                self.request_close();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }
}
