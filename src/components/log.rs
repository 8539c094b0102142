//! Log container
//!
//! Renders host-supplied log entries in insertion order and keeps the view
//! pinned to the newest entry: whenever the entry count grows (and
//! auto-scroll is on) the scroll position jumps to the bottom. Replacing
//! the list with one that is no longer leaves the position alone.

use super::scroll::ScrollState;
use crate::markup::{class_names, Element, Node, NodeId, NodeRef};
use crate::traits::{Component, ComponentKind, Handled, Interactive, Scrollable};
use chrono::{DateTime, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry identifier: numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntryId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for EntryId {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A log line supplied by the host; never mutated by the container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub message: String,
}

impl LogEntry {
    pub fn new(id: impl Into<EntryId>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: Utc::now(),
            level,
            component: None,
            message: message.into(),
        }
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Timestamp formatter used by entry rows
pub type TimestampFormat = fn(&DateTime<Utc>) -> String;

/// `HH:MM:SS.mmm` in local time
pub fn default_format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M:%S%.3f").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSize {
    Sm,
    Md,
    Lg,
    FullHeight,
}

impl LogSize {
    fn as_str(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::FullHeight => "fullheight",
        }
    }
}

/// One entry row
pub fn render_entry(
    entry: &LogEntry,
    show_timestamp: bool,
    show_component: bool,
    format_timestamp: TimestampFormat,
) -> Element {
    let level = entry.level.as_str();
    let entry_class = match entry.level {
        LogLevel::Error | LogLevel::Warn => format!("log-entry-{level}"),
        _ => String::new(),
    };
    let component = entry.component.as_deref().filter(|_| show_component);

    Element::new("div")
        .class(&class_names(&["log-entry", &entry_class]))
        .child_if(show_timestamp, || {
            Element::new("span")
                .class("log-timestamp")
                .child(format_timestamp(&entry.timestamp))
                .into()
        })
        .child(
            Element::new("span")
                .class(&format!("log-level log-level-{level}"))
                .child(level),
        )
        .child_if(component.is_some(), || {
            Element::new("span")
                .class("log-component")
                .child(format!("[{}]", component.unwrap_or_default()))
                .into()
        })
        .child(
            Element::new("span")
                .class("log-message")
                .child(entry.message.as_str()),
        )
}

// ─────────────────────────────────────────────────────────────────────────────
// LogContainer
// ─────────────────────────────────────────────────────────────────────────────

pub struct LogContainer {
    node: NodeId,
    entries: Vec<LogEntry>,
    /// Entry count at the previous update
    prev_len: usize,
    auto_scroll: bool,
    scroll: ScrollState,
    size: Option<LogSize>,
    compact: bool,
    show_timestamp: bool,
    show_component: bool,
    empty_message: String,
    format_timestamp: TimestampFormat,
    class: String,
}

impl LogContainer {
    pub fn new() -> Self {
        Self {
            node: NodeId::next(),
            entries: Vec::new(),
            prev_len: 0,
            auto_scroll: true,
            scroll: ScrollState::new(),
            size: None,
            compact: false,
            show_timestamp: true,
            show_component: true,
            empty_message: "No log entries".to_string(),
            format_timestamp: default_format_timestamp,
            class: String::new(),
        }
    }

    pub fn size(mut self, size: LogSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn auto_scroll(mut self, enabled: bool) -> Self {
        self.auto_scroll = enabled;
        self
    }

    pub fn show_timestamp(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    pub fn show_component(mut self, show: bool) -> Self {
        self.show_component = show;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn format_timestamp(mut self, format: TimestampFormat) -> Self {
        self.format_timestamp = format;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_node_ref(self, node_ref: &NodeRef) -> Self {
        node_ref.attach(self.node);
        self
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        self.auto_scroll = enabled;
    }

    /// Replace the entry list
    ///
    /// Returns true if the update scrolled the view to the bottom.
    pub fn set_entries(&mut self, entries: Vec<LogEntry>) -> bool {
        let grew = entries.len() > self.prev_len;
        self.entries = entries;
        self.scroll.set_total(self.entries.len());
        let scrolled = self.auto_scroll && grew;
        if scrolled {
            self.scroll.scroll_to_bottom();
        }
        self.prev_len = self.entries.len();
        scrolled
    }

    pub fn push(&mut self, entry: LogEntry) -> bool {
        let mut entries = std::mem::take(&mut self.entries);
        entries.push(entry);
        self.set_entries(entries)
    }

    pub fn clear(&mut self) {
        self.set_entries(Vec::new());
    }

    /// Rows available to show entries
    pub fn set_viewport(&mut self, rows: usize) {
        self.scroll.update_dimensions(self.entries.len(), rows);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries inside the current viewport
    pub fn visible_entries(&self) -> &[LogEntry] {
        let (start, end) = self.visible_range();
        &self.entries[start.min(end)..end]
    }

    pub fn is_auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }
}

impl Default for LogContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContainer")
            .field("entries", &self.entries.len())
            .field("prev_len", &self.prev_len)
            .field("auto_scroll", &self.auto_scroll)
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

impl Component for LogContainer {
    fn kind(&self) -> ComponentKind {
        ComponentKind::LogContainer
    }

    fn render(&self) -> Element {
        let size_class = self
            .size
            .map(|s| format!("log-{}", s.as_str()))
            .unwrap_or_default();
        let root = Element::new("div")
            .node(self.node)
            .class(&class_names(&[
                "log-container",
                &size_class,
                if self.compact { "log-compact" } else { "" },
                &self.class,
            ]))
            .attr("role", "log")
            .attr("aria-live", "polite");

        if self.entries.is_empty() {
            return root.child(
                Element::new("div")
                    .class("log-empty")
                    .child(Element::new("span").class("log-empty-icon").child("□"))
                    .child(
                        Element::new("span")
                            .class("log-empty-text")
                            .child(self.empty_message.as_str()),
                    ),
            );
        }
        root.children(self.entries.iter().map(|entry| {
            Node::from(render_entry(
                entry,
                self.show_timestamp,
                self.show_component,
                self.format_timestamp,
            ))
        }))
    }
}

impl Scrollable for LogContainer {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for LogContainer {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::PageUp => self.scroll.page_up(),
            KeyCode::PageDown => self.scroll.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:scroll  g/G:top/bottom")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Header and filter parts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LogHeader {
    title: String,
    show_live: bool,
    actions: Vec<Node>,
}

impl LogHeader {
    pub fn new() -> Self {
        Self {
            title: "Logs".to_string(),
            show_live: false,
            actions: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn live(mut self, show: bool) -> Self {
        self.show_live = show;
        self
    }

    pub fn action(mut self, action: impl Into<Node>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn render(&self) -> Element {
        Element::new("div")
            .class("log-header")
            .child(
                Element::new("div")
                    .class("log-header-title")
                    .child(self.title.as_str())
                    .child_if(self.show_live, || {
                        Element::new("span")
                            .class("log-live-indicator")
                            .attr("style", "margin-left: 8px")
                            .child("LIVE")
                            .into()
                    }),
            )
            .child_if(!self.actions.is_empty(), || {
                Element::new("div")
                    .class("log-header-actions")
                    .children(self.actions.iter().cloned())
                    .into()
            })
    }
}

impl Default for LogHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Level filter toggle button
#[derive(Debug, Clone)]
pub struct LogFilter {
    pub level: LogLevel,
    pub active: bool,
    pub count: Option<usize>,
}

impl LogFilter {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            active: false,
            count: None,
        }
    }

    pub fn render(&self) -> Element {
        Element::new("button")
            .class(&class_names(&["log-filter", if self.active { "active" } else { "" }]))
            .attr("type", "button")
            .child(Element::new("span").child(self.level.as_str()))
            .child_if(self.count.is_some(), || {
                Element::new("span")
                    .class("log-filter-count")
                    .child(self.count.unwrap_or_default().to_string())
                    .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entries(n: usize, tag: &str) -> Vec<LogEntry> {
        (0..n)
            .map(|i| LogEntry::new(i as i64, LogLevel::Info, format!("{tag} {i}")))
            .collect()
    }

    fn fixed(ts: &DateTime<Utc>) -> String {
        ts.format("%H:%M:%S%.3f").to_string()
    }

    #[test]
    fn test_growth_scrolls_to_bottom() {
        let mut log = LogContainer::new();
        log.set_viewport(3);
        assert!(log.set_entries(entries(5, "a")));
        log.scroll_to_top();

        let mut six = entries(5, "a");
        six.push(LogEntry::new(5, LogLevel::Warn, "new"));
        assert!(log.set_entries(six));
        assert_eq!(log.scroll_offset(), 3);
        assert!(log.scroll_state().is_at_bottom());
    }

    #[test]
    fn test_same_count_replacement_does_not_scroll() {
        let mut log = LogContainer::new();
        log.set_viewport(3);
        log.set_entries(entries(5, "a"));
        log.scroll_to_top();

        assert!(!log.set_entries(entries(5, "b")));
        assert_eq!(log.scroll_offset(), 0);
    }

    #[test]
    fn test_shrinking_does_not_scroll() {
        let mut log = LogContainer::new();
        log.set_viewport(2);
        log.set_entries(entries(5, "a"));
        log.scroll_to_top();

        assert!(!log.set_entries(entries(3, "a")));
        assert_eq!(log.scroll_offset(), 0);

        // Growth is measured from the last observed count
        assert!(log.set_entries(entries(4, "a")));
    }

    #[test]
    fn test_auto_scroll_disabled() {
        let mut log = LogContainer::new().auto_scroll(false);
        log.set_viewport(2);
        assert!(!log.set_entries(entries(5, "a")));
        assert_eq!(log.scroll_offset(), 0);
    }

    #[test]
    fn test_push_and_clear() {
        let mut log = LogContainer::new();
        log.set_viewport(2);
        assert!(log.push(LogEntry::new(1, LogLevel::Info, "one")));
        assert!(log.push(LogEntry::new(2, LogLevel::Info, "two")));
        assert!(log.push(LogEntry::new(3, LogLevel::Info, "three")));
        assert_eq!(log.visible_entries().len(), 2);
        assert_eq!(log.visible_entries()[1].message, "three");

        log.clear();
        assert!(log.entries().is_empty());
        assert_eq!(log.scroll_offset(), 0);
    }

    #[test]
    fn test_keys_scroll() {
        let mut log = LogContainer::new();
        log.set_viewport(2);
        log.set_entries(entries(6, "a"));
        assert_eq!(log.handle_key(crate::host::events::key(KeyCode::Char('g'))), Handled::Yes);
        assert_eq!(log.scroll_offset(), 0);
        log.handle_key(crate::host::events::key(KeyCode::Down));
        assert_eq!(log.scroll_offset(), 1);
        assert_eq!(log.handle_key(crate::host::events::key(KeyCode::Enter)), Handled::No);
    }

    #[test]
    fn test_empty_render() {
        let el = LogContainer::new().render();
        assert_eq!(el.class_attr(), "log-container");
        assert_eq!(el.get_attr("role"), Some("log"));
        assert_eq!(
            el.find_class("log-empty-text").unwrap().text_content(),
            "No log entries"
        );
    }

    #[test]
    fn test_entry_rows() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        let mut log = LogContainer::new()
            .size(LogSize::FullHeight)
            .compact(true)
            .format_timestamp(fixed);
        log.set_entries(vec![
            LogEntry::new(1, LogLevel::Error, "boom").component("api").at(ts),
            LogEntry::new("two", LogLevel::Debug, "quiet").at(ts),
        ]);

        let el = log.render();
        assert_eq!(el.class_attr(), "log-container log-fullheight log-compact");

        let mut rows = Vec::new();
        el.find_all_class("log-entry", &mut rows);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].class_attr(), "log-entry log-entry-error");
        assert_eq!(rows[1].class_attr(), "log-entry");
        assert_eq!(
            rows[0].find_class("log-timestamp").unwrap().text_content(),
            "09:05:07.000"
        );
        assert_eq!(rows[0].find_class("log-component").unwrap().text_content(), "[api]");
        assert!(rows[1].find_class("log-component").is_none());
        assert_eq!(
            rows[1].find_class("log-level").unwrap().class_attr(),
            "log-level log-level-debug"
        );
    }

    #[test]
    fn test_hidden_columns() {
        let entry = LogEntry::new(1, LogLevel::Warn, "w").component("db");
        let el = render_entry(&entry, false, false, default_format_timestamp);
        assert!(el.find_class("log-timestamp").is_none());
        assert!(el.find_class("log-component").is_none());
        assert_eq!(el.class_attr(), "log-entry log-entry-warn");
    }

    #[test]
    fn test_default_timestamp_shape() {
        let formatted = default_format_timestamp(&Utc::now());
        assert_eq!(formatted.len(), 12);
        assert_eq!(&formatted[2..3], ":");
        assert_eq!(&formatted[8..9], ".");
    }

    #[test]
    fn test_header_and_filter() {
        let header = LogHeader::new().live(true).render();
        assert_eq!(header.find_class("log-header-title").unwrap().text_content(), "LogsLIVE");
        assert!(header.find_class("log-header-actions").is_none());

        let filter = LogFilter {
            level: LogLevel::Error,
            active: true,
            count: Some(3),
        }
        .render();
        assert_eq!(filter.class_attr(), "log-filter active");
        assert_eq!(filter.find_class("log-filter-count").unwrap().text_content(), "3");
        assert_eq!(LogFilter::new(LogLevel::Info).render().class_attr(), "log-filter");
    }

    #[test]
    fn test_entry_id_serializes_untagged() {
        let json = serde_json::to_string(&EntryId::Int(4)).unwrap();
        assert_eq!(json, "4");
        let json = serde_json::to_string(&EntryId::from("x")).unwrap();
        assert_eq!(json, "\"x\"");
    }
}
