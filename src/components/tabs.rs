//! Tabs component
//!
//! Holds one selected tab id among the tabs registered with it, either
//! owned internally (uncontrolled) or supplied by the host (controlled).
//! Arrow keys move input focus across enabled tabs; only activation
//! (click, Enter, Space) changes the selection.

use super::disclosure::{FocusMove, Orientation};
use super::scope::{RenderScope, TabsContext};
use crate::error::UsageError;
use crate::host::events::is_activation;
use crate::host::Host;
use crate::markup::{class_names, Element, Node, NodeId, NodeRef};
use crate::traits::{Component, ComponentKind, Handled, Interactive};
use crossterm::event::KeyEvent;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TabsVariant {
    #[default]
    Underline,
    Bordered,
    Pills,
}

impl TabsVariant {
    fn class(self) -> &'static str {
        match self {
            Self::Underline => "",
            Self::Bordered => "tabs-bordered",
            Self::Pills => "tabs-pills",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TabsSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl TabsSize {
    fn class(self) -> &'static str {
        match self {
            Self::Sm => "tabs-sm",
            Self::Md => "",
            Self::Lg => "tabs-lg",
        }
    }
}

/// Who owns the selected id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabsMode {
    /// The host supplies the value; the component only reports changes
    Controlled(String),
    /// The component owns the value, seeded by an optional default
    Uncontrolled(Option<String>),
}

/// A tab button
#[derive(Debug, Clone)]
pub struct Tab {
    node: NodeId,
    id: String,
    label: String,
    disabled: bool,
    icon: Option<String>,
    badge: Option<String>,
}

impl Tab {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node: NodeId::next(),
            id: id.into(),
            label: label.into(),
            disabled: false,
            icon: None,
            badge: None,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn render(&self, scope: &RenderScope) -> Result<Element, UsageError> {
        let ctx = scope.tabs("Tab")?;
        Ok(self.render_in(ctx))
    }

    fn render_in(&self, ctx: TabsContext) -> Element {
        let active = ctx.is_active(&self.id);
        Element::new("button")
            .node(self.node)
            .class("tab")
            .attr("type", "button")
            .attr("role", "tab")
            .attr("id", format!("tab-{}", self.id))
            .attr("aria-selected", active.to_string())
            .attr("aria-controls", format!("panel-{}", self.id))
            .attr("aria-disabled", self.disabled.to_string())
            .attr("tabindex", if active { "0" } else { "-1" })
            .attr_if(self.disabled, "disabled", "")
            .child_if(self.icon.is_some(), || {
                Element::new("span")
                    .class("tab-icon")
                    .child(self.icon.clone().unwrap_or_default())
                    .into()
            })
            .child(self.label.as_str())
            .child_if(self.badge.is_some(), || {
                Element::new("span")
                    .class("tab-badge")
                    .child(self.badge.clone().unwrap_or_default())
                    .into()
            })
    }
}

/// Content panel paired with a tab id
#[derive(Debug, Clone)]
pub struct TabPanel {
    tab_id: String,
    content: Vec<Node>,
}

impl TabPanel {
    pub fn new(tab_id: impl Into<String>) -> Self {
        Self {
            tab_id: tab_id.into(),
            content: Vec::new(),
        }
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.content.push(child.into());
        self
    }

    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    pub fn render(&self, scope: &RenderScope) -> Result<Element, UsageError> {
        let ctx = scope.tabs("TabPanel")?;
        Ok(self.render_in(ctx))
    }

    /// Every panel stays in the tree; inactive ones are hidden
    fn render_in(&self, ctx: TabsContext) -> Element {
        let active = ctx.is_active(&self.tab_id);
        Element::new("div")
            .class(&class_names(&["tab-panel", if active { "active" } else { "" }]))
            .attr("role", "tabpanel")
            .attr("id", format!("panel-{}", self.tab_id))
            .attr("aria-labelledby", format!("tab-{}", self.tab_id))
            .attr("aria-hidden", (!active).to_string())
            .attr("tabindex", "0")
            .children(self.content.iter().cloned())
    }
}

/// Tab selection coordinator
pub struct Tabs {
    host: Host,
    root: NodeId,
    mode: TabsMode,
    variant: TabsVariant,
    size: TabsSize,
    full_width: bool,
    class: String,
    tabs: Vec<Tab>,
    panels: Vec<TabPanel>,
    on_change: Option<Box<dyn FnMut(&str)>>,
}

impl Tabs {
    /// Uncontrolled tabs with nothing selected
    pub fn new(host: &Host) -> Self {
        Self {
            host: host.clone(),
            root: NodeId::next(),
            mode: TabsMode::Uncontrolled(None),
            variant: TabsVariant::default(),
            size: TabsSize::default(),
            full_width: false,
            class: String::new(),
            tabs: Vec::new(),
            panels: Vec::new(),
            on_change: None,
        }
    }

    /// Uncontrolled, seeded with an initial selection
    pub fn default_tab(mut self, id: impl Into<String>) -> Self {
        self.mode = TabsMode::Uncontrolled(Some(id.into()));
        self
    }

    /// Controlled by the host, starting at `value`
    pub fn controlled(mut self, value: impl Into<String>) -> Self {
        self.mode = TabsMode::Controlled(value.into());
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn variant(mut self, variant: TabsVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: TabsSize) -> Self {
        self.size = size;
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_node_ref(self, node_ref: &NodeRef) -> Self {
        node_ref.attach(self.root);
        self
    }

    /// Register a tab button; returns its node for click targeting
    pub fn add_tab(&mut self, tab: Tab) -> NodeId {
        let node = tab.node;
        self.tabs.push(tab);
        node
    }

    pub fn add_panel(&mut self, panel: TabPanel) {
        self.panels.push(panel);
    }

    // ─────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────

    pub fn active(&self) -> Option<&str> {
        match &self.mode {
            TabsMode::Controlled(value) => Some(value.as_str()),
            TabsMode::Uncontrolled(value) => value.as_deref(),
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.mode, TabsMode::Controlled(_))
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn root_node(&self) -> NodeId {
        self.root
    }

    /// Activate a tab by id
    ///
    /// Unknown and disabled ids are ignored. Controlled instances only
    /// notify; the host decides whether the value changes.
    pub fn select(&mut self, id: &str) -> bool {
        match self.tabs.iter().find(|t| t.id == id) {
            Some(tab) if !tab.disabled => {}
            _ => return false,
        }
        if let TabsMode::Uncontrolled(value) = &mut self.mode {
            *value = Some(id.to_string());
        }
        debug!(tab = id, controlled = self.is_controlled(), "tab selected");
        if let Some(callback) = self.on_change.as_mut() {
            callback(id);
        }
        true
    }

    /// Pointer activation of a tab button
    pub fn click(&mut self, node: NodeId) -> bool {
        let Some(id) = self.tabs.iter().find(|t| t.node == node).map(|t| t.id.clone()) else {
            return false;
        };
        self.select(&id)
    }

    /// Host-side update of a controlled value
    pub fn set_controlled_value(&mut self, value: impl Into<String>) -> Result<(), UsageError> {
        match &mut self.mode {
            TabsMode::Controlled(current) => {
                *current = value.into();
                Ok(())
            }
            TabsMode::Uncontrolled(_) => Err(UsageError::NotControlled),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────

    fn enabled_nodes(&self) -> Vec<NodeId> {
        self.tabs
            .iter()
            .filter(|t| !t.disabled)
            .map(|t| t.node)
            .collect()
    }

    /// Id of the tab holding input focus, if any
    pub fn focused_tab(&self) -> Option<&str> {
        let active = self.host.active_element()?;
        self.tabs
            .iter()
            .find(|t| t.node == active)
            .map(|t| t.id.as_str())
    }

    /// Give input focus to a tab button
    pub fn focus_tab(&self, id: &str) {
        if let Some(tab) = self.tabs.iter().find(|t| t.id == id && !t.disabled) {
            self.host.focus(tab.node);
        }
    }

    fn move_focus(&self, movement: FocusMove) {
        let enabled = self.enabled_nodes();
        let current = self
            .host
            .active_element()
            .and_then(|active| enabled.iter().position(|n| *n == active));
        let next = movement.apply(current, enabled.len());
        if next != current {
            if let Some(node) = next.and_then(|i| enabled.get(i)) {
                self.host.focus(*node);
            }
        }
    }

    fn context(&self) -> TabsContext<'_> {
        TabsContext {
            active: self.active(),
        }
    }
}

impl std::fmt::Debug for Tabs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tabs")
            .field("root", &self.root)
            .field("mode", &self.mode)
            .field("tabs", &self.tabs)
            .field("panels", &self.panels.len())
            .finish_non_exhaustive()
    }
}

impl Component for Tabs {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Tabs
    }

    fn render(&self) -> Element {
        let ctx = self.context();
        Element::new("div")
            .node(self.root)
            .class(&class_names(&[
                "tabs",
                self.variant.class(),
                self.size.class(),
                if self.full_width { "tabs-full" } else { "" },
                &self.class,
            ]))
            .child(
                Element::new("div")
                    .class("tab-list")
                    .attr("role", "tablist")
                    .children(self.tabs.iter().map(|t| Node::from(t.render_in(ctx)))),
            )
            .child_if(!self.panels.is_empty(), || {
                Element::new("div")
                    .class("tab-panels")
                    .children(self.panels.iter().map(|p| Node::from(p.render_in(ctx))))
                    .into()
            })
    }
}

impl Interactive for Tabs {
    /// Key-down on the tab list
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if let Some(movement) = FocusMove::from_key(key.code, Orientation::Horizontal) {
            self.move_focus(movement);
            return Handled::Yes;
        }
        if is_activation(key.code) {
            if let Some(id) = self.focused_tab().map(str::to_string) {
                return self.select(&id).into();
            }
        }
        Handled::No
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("←→:focus  Enter:select")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::events::key;
    use crossterm::event::KeyCode;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_tabs(host: &Host) -> Tabs {
        let mut tabs = Tabs::new(host);
        tabs.add_tab(Tab::new("one", "First"));
        tabs.add_tab(Tab::new("two", "Second").disabled(true));
        tabs.add_tab(Tab::new("three", "Third").badge("4"));
        for id in ["one", "two", "three"] {
            tabs.add_panel(TabPanel::new(id).child(format!("{id} content")));
        }
        tabs
    }

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |id: &str| sink.borrow_mut().push(id.to_string()))
    }

    #[test]
    fn test_nothing_active_without_default() {
        let host = Host::new();
        let tabs = sample_tabs(&host);
        assert_eq!(tabs.active(), None);

        let el = tabs.render();
        let mut panels = Vec::new();
        el.find_all_class("active", &mut panels);
        assert!(panels.is_empty());
    }

    #[test]
    fn test_uncontrolled_select() {
        let host = Host::new();
        let (seen, callback) = recorder();
        let mut tabs = sample_tabs(&host).default_tab("one").on_change(callback);

        assert!(tabs.select("three"));
        assert_eq!(tabs.active(), Some("three"));
        assert_eq!(*seen.borrow(), vec!["three"]);
    }

    #[test]
    fn test_disabled_and_unknown_are_noops() {
        let host = Host::new();
        let (seen, callback) = recorder();
        let mut tabs = sample_tabs(&host).default_tab("one").on_change(callback);

        assert!(!tabs.select("two"));
        assert!(!tabs.select("missing"));
        assert_eq!(tabs.active(), Some("one"));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_controlled_only_notifies() {
        let host = Host::new();
        let (seen, callback) = recorder();
        let mut tabs = sample_tabs(&host).controlled("one").on_change(callback);

        assert!(tabs.select("three"));
        assert_eq!(tabs.active(), Some("one"));
        assert_eq!(*seen.borrow(), vec!["three"]);

        tabs.set_controlled_value("three").unwrap();
        assert_eq!(tabs.active(), Some("three"));
    }

    #[test]
    fn test_set_controlled_value_on_uncontrolled_fails() {
        let host = Host::new();
        let mut tabs = sample_tabs(&host);
        assert_eq!(
            tabs.set_controlled_value("one"),
            Err(UsageError::NotControlled)
        );
    }

    #[test]
    fn test_arrows_move_focus_not_selection() {
        let host = Host::new();
        let mut tabs = sample_tabs(&host).default_tab("one");
        tabs.focus_tab("one");

        tabs.handle_key(key(KeyCode::Right));
        assert_eq!(tabs.focused_tab(), Some("three"));
        assert_eq!(tabs.active(), Some("one"));

        tabs.handle_key(key(KeyCode::Right));
        assert_eq!(tabs.focused_tab(), Some("one"));

        tabs.handle_key(key(KeyCode::Left));
        assert_eq!(tabs.focused_tab(), Some("three"));

        tabs.handle_key(key(KeyCode::Home));
        assert_eq!(tabs.focused_tab(), Some("one"));
        tabs.handle_key(key(KeyCode::End));
        assert_eq!(tabs.focused_tab(), Some("three"));
    }

    #[test]
    fn test_enter_selects_focused_tab() {
        let host = Host::new();
        let mut tabs = sample_tabs(&host).default_tab("one");
        tabs.focus_tab("one");
        tabs.handle_key(key(KeyCode::End));

        assert_eq!(tabs.handle_key(key(KeyCode::Enter)), Handled::Yes);
        assert_eq!(tabs.active(), Some("three"));
    }

    #[test]
    fn test_click_by_node() {
        let host = Host::new();
        let mut tabs = Tabs::new(&host);
        let a = tabs.add_tab(Tab::new("a", "A"));
        let b = tabs.add_tab(Tab::new("b", "B"));

        assert!(tabs.click(b));
        assert_eq!(tabs.active(), Some("b"));
        assert!(tabs.click(a));
        assert_eq!(tabs.active(), Some("a"));
        assert!(!tabs.click(NodeId::next()));
    }

    #[test]
    fn test_exactly_one_panel_active() {
        let host = Host::new();
        let mut tabs = sample_tabs(&host).default_tab("one");
        tabs.select("three");
        tabs.select("two");

        let el = tabs.render();
        let mut panels = Vec::new();
        el.find_all_class("tab-panel", &mut panels);
        assert_eq!(panels.len(), 3);

        let active: Vec<_> = panels.iter().filter(|p| p.has_class("active")).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].get_attr("id"), Some("panel-three"));
        assert_eq!(active[0].get_attr("aria-hidden"), Some("false"));
        assert_eq!(panels[0].get_attr("aria-hidden"), Some("true"));
    }

    #[test]
    fn test_render_classes_and_tab_attrs() {
        let host = Host::new();
        let tabs = sample_tabs(&host)
            .default_tab("three")
            .variant(TabsVariant::Pills)
            .size(TabsSize::Sm)
            .full_width(true);

        let el = tabs.render();
        assert_eq!(el.class_attr(), "tabs tabs-pills tabs-sm tabs-full");

        let mut buttons = Vec::new();
        el.find_all_class("tab", &mut buttons);
        assert_eq!(buttons[0].get_attr("tabindex"), Some("-1"));
        assert_eq!(buttons[1].get_attr("disabled"), Some(""));
        assert_eq!(buttons[2].get_attr("id"), Some("tab-three"));
        assert_eq!(buttons[2].get_attr("aria-controls"), Some("panel-three"));
        assert_eq!(buttons[2].get_attr("tabindex"), Some("0"));
        assert!(buttons[2].find_class("tab-badge").is_some());
    }

    #[test]
    fn test_default_classes() {
        let host = Host::new();
        assert_eq!(Tabs::new(&host).render().class_attr(), "tabs");
    }

    #[test]
    fn test_parts_outside_tabs_scope_fail() {
        let scope = RenderScope::root();
        assert!(matches!(
            Tab::new("x", "X").render(&scope),
            Err(UsageError::MissingProvider { component: "Tab", .. })
        ));
        assert!(matches!(
            TabPanel::new("x").render(&scope),
            Err(UsageError::MissingProvider {
                component: "TabPanel",
                ..
            })
        ));
    }

    #[test]
    fn test_parts_inside_scope_render() {
        let scope = RenderScope::root().with_tabs(TabsContext { active: Some("x") });
        let tab = Tab::new("x", "X").render(&scope).unwrap();
        assert_eq!(tab.get_attr("aria-selected"), Some("true"));
    }
}
