//! Render scope - the explicit channel between a coordinator and its parts
//!
//! Menu items and tabs need state owned by their parent (which item has
//! focus, which tab is active). The parent passes that state down in a
//! `RenderScope` when it renders its parts. A part rendered with a scope
//! that lacks its parent's context fails with `UsageError::MissingProvider`.

use crate::error::UsageError;
use crate::markup::NodeId;

/// State a Menu shares with its items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuContext {
    pub is_open: bool,
    pub focused: Option<NodeId>,
}

/// State Tabs shares with its tabs and panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabsContext<'a> {
    pub active: Option<&'a str>,
}

impl TabsContext<'_> {
    pub fn is_active(&self, id: &str) -> bool {
        self.active == Some(id)
    }
}

/// Contexts available to a part while it renders
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderScope<'a> {
    menu: Option<MenuContext>,
    tabs: Option<TabsContext<'a>>,
}

impl<'a> RenderScope<'a> {
    /// A scope with no providers
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_menu(mut self, ctx: MenuContext) -> Self {
        self.menu = Some(ctx);
        self
    }

    pub fn with_tabs(mut self, ctx: TabsContext<'a>) -> Self {
        self.tabs = Some(ctx);
        self
    }

    pub fn menu(&self, component: &'static str) -> Result<MenuContext, UsageError> {
        self.menu.ok_or(UsageError::MissingProvider {
            component,
            provider: "Menu",
        })
    }

    pub fn tabs(&self, component: &'static str) -> Result<TabsContext<'a>, UsageError> {
        self.tabs.ok_or(UsageError::MissingProvider {
            component,
            provider: "Tabs",
        })
    }
}
