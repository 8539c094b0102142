//! Menu component
//!
//! A dropdown revealed by a trigger button. The menu owns its disclosure
//! state and the roving focus among its items; items register with the
//! menu when they are added instead of being discovered by inspecting
//! rendered content.
//!
//! # States
//!
//! ```text
//!            trigger click
//!   CLOSED ─────────────────▶ OPEN ──┐ arrows / Home / End move focus
//!     ▲                         │  ◀─┘
//!     └─────────────────────────┘
//!   trigger click, outside pointer-down, Escape, Tab, item selected
//! ```
//!
//! While open the menu holds document-level pointer-down and key-down
//! subscriptions; closing (or dropping the menu) releases both at once.

use super::disclosure::{Disclosure, FocusMove, Orientation};
use super::scope::{MenuContext, RenderScope};
use crate::error::UsageError;
use crate::host::events::is_activation;
use crate::host::{DocumentEvent, DocumentListener, Host, ListenerKind, Subscription};
use crate::markup::{class_names, Element, Node, NodeId, NodeRef};
use crate::traits::{Component, ComponentKind, Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

/// Callback invoked when an item is selected
pub type Action = Box<dyn FnMut()>;

/// Placement of the content panel relative to the trigger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuPosition {
    #[default]
    BottomStart,
    BottomEnd,
    TopStart,
    TopEnd,
}

impl MenuPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuItemVariant {
    #[default]
    Default,
    Danger,
}

/// A selectable menu entry
pub struct MenuItem {
    node: NodeId,
    label: String,
    variant: MenuItemVariant,
    disabled: bool,
    icon: Option<String>,
    shortcut: Option<String>,
    action: Option<Action>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            node: NodeId::next(),
            label: label.into(),
            variant: MenuItemVariant::Default,
            disabled: false,
            icon: None,
            shortcut: None,
            action: None,
        }
    }

    pub fn variant(mut self, variant: MenuItemVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    pub fn on_select(mut self, action: impl FnMut() + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn shortcut_hint(&self) -> Option<&str> {
        self.shortcut.as_deref()
    }

    pub fn item_variant(&self) -> MenuItemVariant {
        self.variant
    }

    /// Render inside a Menu's scope
    pub fn render(&self, scope: &RenderScope) -> Result<Element, UsageError> {
        let ctx = scope.menu("MenuItem")?;
        Ok(self.render_in(ctx))
    }

    fn render_in(&self, ctx: MenuContext) -> Element {
        let variant_class = match self.variant {
            MenuItemVariant::Default => "",
            MenuItemVariant::Danger => "menu-item-danger",
        };
        let focused = ctx.focused == Some(self.node);

        Element::new("button")
            .node(self.node)
            .class(&class_names(&["menu-item", variant_class]))
            .attr("type", "button")
            .attr("role", "menuitem")
            .attr("tabindex", if focused { "0" } else { "-1" })
            .attr_if(self.disabled, "disabled", "")
            .child_if(self.icon.is_some(), || {
                Element::new("span")
                    .class("menu-item-icon")
                    .child(self.icon.clone().unwrap_or_default())
                    .into()
            })
            .child(
                Element::new("span")
                    .class("menu-item-label")
                    .child(self.label.as_str()),
            )
            .child_if(self.shortcut.is_some(), || {
                Element::new("span")
                    .class("menu-item-shortcut")
                    .child(self.shortcut.clone().unwrap_or_default())
                    .into()
            })
    }
}

impl std::fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuItem")
            .field("node", &self.node)
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// Anything that can sit in the content panel
#[derive(Debug)]
enum MenuEntry {
    Item(MenuItem),
    Separator,
    Label(String),
}

/// Dropdown menu coordinator
pub struct Menu {
    host: Host,
    root: NodeId,
    trigger: NodeId,
    content: NodeId,
    trigger_label: String,
    position: MenuPosition,
    min_width: Option<String>,
    class: String,
    entries: Vec<MenuEntry>,
    state: Disclosure,
    /// Document listeners, held only while open
    listeners: Vec<Subscription>,
}

impl Menu {
    pub fn new(host: &Host, trigger_label: impl Into<String>) -> Self {
        Self {
            host: host.clone(),
            root: NodeId::next(),
            trigger: NodeId::next(),
            content: NodeId::next(),
            trigger_label: trigger_label.into(),
            position: MenuPosition::default(),
            min_width: None,
            class: String::new(),
            entries: Vec::new(),
            state: Disclosure::new(),
            listeners: Vec::new(),
        }
    }

    /// Expose the root element through a caller-held handle
    pub fn with_node_ref(self, node_ref: &NodeRef) -> Self {
        node_ref.attach(self.root);
        self
    }

    pub fn position(mut self, position: MenuPosition) -> Self {
        self.position = position;
        self
    }

    pub fn min_width(mut self, min_width: impl Into<String>) -> Self {
        self.min_width = Some(min_width.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Register an item; returns its node for event targeting
    pub fn add_item(&mut self, item: MenuItem) -> NodeId {
        let node = item.node;
        self.entries.push(MenuEntry::Item(item));
        node
    }

    pub fn add_separator(&mut self) {
        self.entries.push(MenuEntry::Separator);
    }

    pub fn add_label(&mut self, text: impl Into<String>) {
        self.entries.push(MenuEntry::Label(text.into()));
    }

    // ─────────────────────────────────────────────────────────────
    // State queries
    // ─────────────────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Position of the focused item among enabled items
    pub fn focused_index(&self) -> Option<usize> {
        self.state.focused_index()
    }

    pub fn focused_item(&self) -> Option<NodeId> {
        self.focused_index()
            .and_then(|i| self.enabled_nodes().get(i).copied())
    }

    pub fn root_node(&self) -> NodeId {
        self.root
    }

    pub fn trigger_node(&self) -> NodeId {
        self.trigger
    }

    pub fn content_node(&self) -> NodeId {
        self.content
    }

    pub fn trigger_label(&self) -> &str {
        &self.trigger_label
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.entries.iter().filter_map(|e| match e {
            MenuEntry::Item(item) => Some(item),
            _ => None,
        })
    }

    fn enabled_nodes(&self) -> Vec<NodeId> {
        self.items()
            .filter(|item| !item.disabled)
            .map(|item| item.node)
            .collect()
    }

    // ─────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────

    /// Trigger activation: open when closed, close when open
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    fn open(&mut self) {
        let first = if self.enabled_nodes().is_empty() {
            None
        } else {
            Some(0)
        };
        self.state.open(first);
        self.listeners = vec![
            self.host.subscribe(ListenerKind::PointerDown),
            self.host.subscribe(ListenerKind::KeyDown),
        ];
        self.sync_focus();
        debug!(menu = self.root.raw(), "menu opened");
    }

    fn close(&mut self) {
        if let Some(node) = self.focused_item() {
            self.host.blur(node);
        }
        self.state.close();
        self.listeners.clear();
        debug!(menu = self.root.raw(), "menu closed");
    }

    fn sync_focus(&self) {
        if let Some(node) = self.focused_item() {
            self.host.focus(node);
        }
    }

    fn move_focus(&mut self, movement: FocusMove) {
        let enabled = self.enabled_nodes();
        let current = self
            .host
            .active_element()
            .and_then(|active| enabled.iter().position(|n| *n == active))
            .or(self.state.focused_index());
        self.state.set_focused(movement.apply(current, enabled.len()));
        self.sync_focus();
    }

    /// Pointer activation of an item
    ///
    /// Disabled items and a closed menu ignore it. Otherwise the item's
    /// action runs first, then the menu closes.
    pub fn select(&mut self, node: NodeId) -> bool {
        if !self.is_open() {
            return false;
        }
        let Some(item) = self.entries.iter_mut().find_map(|e| match e {
            MenuEntry::Item(item) if item.node == node => Some(item),
            _ => None,
        }) else {
            return false;
        };
        if item.disabled {
            return false;
        }
        debug!(item = %item.label, "menu item selected");
        if let Some(action) = item.action.as_mut() {
            action();
        }
        self.close();
        true
    }
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("root", &self.root)
            .field("state", &self.state)
            .field("entries", &self.entries)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for Menu {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Menu
    }

    fn render(&self) -> Element {
        let open = self.is_open();
        let root = Element::new("div")
            .node(self.root)
            .class(&class_names(&["menu", &self.class]))
            .attr("data-state", if open { "open" } else { "closed" })
            .child(
                Element::new("button")
                    .node(self.trigger)
                    .class("menu-trigger")
                    .attr("type", "button")
                    .attr("aria-haspopup", "menu")
                    .attr("aria-expanded", open.to_string())
                    .child(self.trigger_label.as_str()),
            );
        if !open {
            return root;
        }

        let ctx = MenuContext {
            is_open: open,
            focused: self.focused_item(),
        };
        let position_class = format!("menu-content-{}", self.position.as_str());
        let entries = self.entries.iter().map(|entry| -> Node {
            match entry {
                MenuEntry::Item(item) => item.render_in(ctx).into(),
                MenuEntry::Separator => Element::new("div")
                    .class("menu-separator")
                    .attr("role", "separator")
                    .into(),
                MenuEntry::Label(text) => Element::new("div")
                    .class("menu-label")
                    .child(text.as_str())
                    .into(),
            }
        });

        root.child(
            Element::new("div")
                .node(self.content)
                .class(&class_names(&["menu-content", &position_class]))
                .attr("role", "menu")
                .attr_if(
                    self.min_width.is_some(),
                    "style",
                    format!("min-width: {}", self.min_width.as_deref().unwrap_or_default()),
                )
                .children(entries),
        )
    }
}

impl Interactive for Menu {
    /// Key-down on the content panel
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if !self.is_open() {
            return Handled::No;
        }
        if let Some(movement) = FocusMove::from_key(key.code, Orientation::Vertical) {
            self.move_focus(movement);
            return Handled::Yes;
        }
        match key.code {
            KeyCode::Tab => {
                // Focus leaves the menu; let the host move it on
                self.close();
                Handled::No
            }
            code if is_activation(code) => match self.focused_item() {
                Some(node) => self.select(node).into(),
                None => Handled::No,
            },
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:move  Enter:select  Esc:close")
    }
}

impl DocumentListener for Menu {
    fn on_document_event(&mut self, event: &DocumentEvent) -> Handled {
        if self.listeners.is_empty() {
            return Handled::No;
        }
        match event {
            DocumentEvent::PointerDown(pointer) if !pointer.passes_through(self.root) => {
                self.close();
                Handled::Yes
            }
            DocumentEvent::Key(key) if key.code == KeyCode::Esc => {
                self.close();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::events::key;
    use crate::host::PointerEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Menu with items Edit, Copy (disabled), Rename, Delete (danger)
    fn sample_menu(host: &Host, log: &Rc<RefCell<Vec<&'static str>>>) -> (Menu, Vec<NodeId>) {
        let mut menu = Menu::new(host, "Actions");
        let mut nodes = Vec::new();
        for (label, disabled) in [("Edit", false), ("Copy", true), ("Rename", false)] {
            let log = log.clone();
            nodes.push(
                menu.add_item(
                    MenuItem::new(label)
                        .disabled(disabled)
                        .on_select(move || log.borrow_mut().push(label)),
                ),
            );
        }
        menu.add_separator();
        let log = log.clone();
        nodes.push(
            menu.add_item(
                MenuItem::new("Delete")
                    .variant(MenuItemVariant::Danger)
                    .on_select(move || log.borrow_mut().push("Delete")),
            ),
        );
        (menu, nodes)
    }

    #[test]
    fn test_open_focuses_first_item_and_subscribes() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, nodes) = sample_menu(&host, &log);

        assert!(!menu.is_open());
        assert_eq!(host.total_listeners(), 0);

        menu.toggle();
        assert!(menu.is_open());
        assert_eq!(menu.focused_index(), Some(0));
        assert_eq!(host.active_element(), Some(nodes[0]));
        assert_eq!(host.listener_count(ListenerKind::PointerDown), 1);
        assert_eq!(host.listener_count(ListenerKind::KeyDown), 1);
    }

    #[test]
    fn test_close_resets_focus_and_listeners() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, _) = sample_menu(&host, &log);

        menu.toggle();
        menu.toggle();
        assert!(!menu.is_open());
        assert_eq!(menu.focused_index(), None);
        assert_eq!(host.total_listeners(), 0);
    }

    #[test]
    fn test_escape_closes() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, _) = sample_menu(&host, &log);
        menu.toggle();

        let handled = menu.on_document_event(&DocumentEvent::Key(key(KeyCode::Esc)));
        assert_eq!(handled, Handled::Yes);
        assert!(!menu.is_open());
        assert_eq!(menu.focused_index(), None);
        assert_eq!(host.total_listeners(), 0);
    }

    #[test]
    fn test_outside_pointer_down_closes_inside_does_not() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, nodes) = sample_menu(&host, &log);
        menu.toggle();

        let inside = PointerEvent::new(nodes[2], [menu.content_node(), menu.root_node()]);
        assert_eq!(
            menu.on_document_event(&DocumentEvent::PointerDown(inside)),
            Handled::No
        );
        assert!(menu.is_open());

        let outside = PointerEvent::on(NodeId::next());
        assert_eq!(
            menu.on_document_event(&DocumentEvent::PointerDown(outside)),
            Handled::Yes
        );
        assert!(!menu.is_open());
        assert_eq!(host.total_listeners(), 0);
    }

    #[test]
    fn test_document_events_ignored_while_closed() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, _) = sample_menu(&host, &log);

        let handled = menu.on_document_event(&DocumentEvent::Key(key(KeyCode::Esc)));
        assert_eq!(handled, Handled::No);
    }

    #[test]
    fn test_arrows_skip_disabled_items_and_wrap() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, nodes) = sample_menu(&host, &log);
        menu.toggle();

        // Enabled order: Edit, Rename, Delete
        menu.handle_key(key(KeyCode::Down));
        assert_eq!(host.active_element(), Some(nodes[2]));
        menu.handle_key(key(KeyCode::Down));
        assert_eq!(host.active_element(), Some(nodes[3]));
        menu.handle_key(key(KeyCode::Down));
        assert_eq!(host.active_element(), Some(nodes[0]));
        menu.handle_key(key(KeyCode::Up));
        assert_eq!(host.active_element(), Some(nodes[3]));
        assert_eq!(menu.focused_index(), Some(2));
    }

    #[test]
    fn test_home_and_end() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, nodes) = sample_menu(&host, &log);
        menu.toggle();

        menu.handle_key(key(KeyCode::End));
        assert_eq!(menu.focused_item(), Some(nodes[3]));
        menu.handle_key(key(KeyCode::Home));
        assert_eq!(menu.focused_item(), Some(nodes[0]));
    }

    #[test]
    fn test_select_runs_action_then_closes() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, nodes) = sample_menu(&host, &log);
        menu.toggle();

        assert!(menu.select(nodes[2]));
        assert_eq!(*log.borrow(), vec!["Rename"]);
        assert!(!menu.is_open());
        assert_eq!(host.total_listeners(), 0);
    }

    #[test]
    fn test_disabled_item_is_inert() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, nodes) = sample_menu(&host, &log);
        menu.toggle();

        assert!(!menu.select(nodes[1]));
        assert!(log.borrow().is_empty());
        assert!(menu.is_open());
    }

    #[test]
    fn test_enter_activates_focused_item() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, _) = sample_menu(&host, &log);
        menu.toggle();

        menu.handle_key(key(KeyCode::End));
        assert_eq!(menu.handle_key(key(KeyCode::Enter)), Handled::Yes);
        assert_eq!(*log.borrow(), vec!["Delete"]);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_tab_closes_and_bubbles() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, _) = sample_menu(&host, &log);
        menu.toggle();

        assert_eq!(menu.handle_key(key(KeyCode::Tab)), Handled::No);
        assert!(!menu.is_open());
        assert_eq!(host.total_listeners(), 0);
    }

    #[test]
    fn test_drop_while_open_releases_listeners() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, _) = sample_menu(&host, &log);
        menu.toggle();
        assert_eq!(host.total_listeners(), 2);

        drop(menu);
        assert_eq!(host.total_listeners(), 0);
    }

    #[test]
    fn test_all_disabled_opens_without_focus() {
        let host = Host::new();
        let mut menu = Menu::new(&host, "Nothing");
        menu.add_item(MenuItem::new("Off").disabled(true));
        menu.toggle();

        assert!(menu.is_open());
        assert_eq!(menu.focused_index(), None);
        menu.handle_key(key(KeyCode::Down));
        assert_eq!(menu.focused_index(), None);
    }

    #[test]
    fn test_render_closed_hides_content() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (menu, _) = sample_menu(&host, &log);

        let el = menu.render();
        assert_eq!(el.class_attr(), "menu");
        assert_eq!(el.get_attr("data-state"), Some("closed"));
        assert!(el.find_class("menu-content").is_none());
    }

    #[test]
    fn test_render_open_content() {
        let host = Host::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (menu, _) = sample_menu(&host, &log);
        let mut menu = menu.position(MenuPosition::TopEnd).min_width("12rem");
        menu.toggle();

        let el = menu.render();
        assert_eq!(el.get_attr("data-state"), Some("open"));
        let content = el.find_class("menu-content").unwrap();
        assert_eq!(content.class_attr(), "menu-content menu-content-top-end");
        assert_eq!(content.get_attr("style"), Some("min-width: 12rem"));

        let mut items = Vec::new();
        content.find_all_class("menu-item", &mut items);
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].get_attr("tabindex"), Some("0"));
        assert_eq!(items[1].get_attr("disabled"), Some(""));
        assert_eq!(items[3].class_attr(), "menu-item menu-item-danger");
        assert!(content.find_class("menu-separator").is_some());
    }

    #[test]
    fn test_item_outside_menu_scope_fails() {
        let item = MenuItem::new("Orphan");
        let err = item.render(&RenderScope::root()).unwrap_err();
        assert_eq!(
            err,
            UsageError::MissingProvider {
                component: "MenuItem",
                provider: "Menu"
            }
        );
    }

    #[test]
    fn test_node_ref_receives_root() {
        let host = Host::new();
        let handle = NodeRef::new();
        let menu = Menu::new(&host, "Open").with_node_ref(&handle);
        assert_eq!(handle.get(), Some(menu.root_node()));
        assert_eq!(menu.render().node, handle.get());
    }
}
