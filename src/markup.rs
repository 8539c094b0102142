//! Markup tree - the render boundary of every component
//!
//! Components never touch a real document. They describe what they would
//! draw as an `Element` tree: a tag, a composed class list, ordered
//! attributes and children. The tree can be serialised to HTML for a
//! browser host, to JSON for tooling, or walked by a terminal renderer.

use serde::Serialize;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique handle for an element a component owns
///
/// Allocated when the component is constructed. Events carry node ids as
/// their targets, which is how a component tells "my backdrop" from
/// "something inside my body".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Caller-supplied handle to a component's root element
///
/// Cloning shares the slot. A component given a `NodeRef` writes its root
/// id into it at the same moment it records the id internally, so both
/// sides always agree on which element is the root.
#[derive(Debug, Clone, Default)]
pub struct NodeRef(Rc<Cell<Option<NodeId>>>);

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolved node, once the owning component has been constructed
    pub fn get(&self) -> Option<NodeId> {
        self.0.get()
    }

    pub(crate) fn attach(&self, node: NodeId) {
        self.0.set(Some(node));
    }
}

/// Compose a class attribute from fragments, skipping empty ones
pub fn class_names(fragments: &[&str]) -> String {
    fragments
        .iter()
        .copied()
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A node in the markup tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text { text: String },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text { .. } => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::text(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::text(text)
    }
}

/// An element with a deterministic class list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeId>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            node: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Bind this element to a node handle
    pub fn node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    /// Append classes from a space-separated string (empty fragments ignored)
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn attr_if(self, cond: bool, name: &str, value: impl Into<String>) -> Self {
        if cond {
            self.attr(name, value)
        } else {
            self
        }
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn child_if(self, cond: bool, child: impl FnOnce() -> Node) -> Self {
        if cond {
            self.child(child())
        } else {
            self
        }
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// The class attribute as it would be written
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Depth-first search for the first element carrying `class`
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find_map(|el| el.find_class(class))
    }

    /// All descendant elements (including self) carrying `class`
    pub fn find_all_class<'a>(&'a self, class: &str, out: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            out.push(self);
        }
        for el in self.children.iter().filter_map(Node::as_element) {
            el.find_all_class(class, out);
        }
    }

    /// Whether `node` is this element or one of its descendants
    pub fn contains(&self, node: NodeId) -> bool {
        self.node == Some(node)
            || self
                .children
                .iter()
                .filter_map(Node::as_element)
                .any(|el| el.contains(node))
    }

    /// Concatenated text content of the subtree
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Serialise to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Element(inner) => collect_text(inner, out),
            Node::Text { text } => out.push_str(text),
        }
    }
}

const VOID_TAGS: [&str; 3] = ["input", "br", "hr"];

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    if !el.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(&el.class_attr()));
    }
    for (name, value) in &el.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape(value));
    }
    out.push('>');
    if VOID_TAGS.contains(&el.tag.as_str()) {
        return;
    }
    for child in &el.children {
        match child {
            Node::Element(inner) => write_element(inner, out),
            Node::Text { text } => out.push_str(&escape(text)),
        }
    }
    let _ = write!(out, "</{}>", el.tag);
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names_skips_empty_fragments() {
        assert_eq!(class_names(&["btn", "", "btn-primary", ""]), "btn btn-primary");
        assert_eq!(class_names(&[""]), "");
    }

    #[test]
    fn test_html_escapes_text_and_attributes() {
        let el = Element::new("p")
            .class("note")
            .attr("title", "a \"quoted\" <tag>")
            .child("1 < 2 & 3");
        assert_eq!(
            el.to_html(),
            "<p class=\"note\" title=\"a &quot;quoted&quot; &lt;tag&gt;\">1 &lt; 2 &amp; 3</p>"
        );
    }

    #[test]
    fn test_void_tags_have_no_closing_tag() {
        let el = Element::new("input").class("input");
        assert_eq!(el.to_html(), "<input class=\"input\">");
    }

    #[test]
    fn test_contains_walks_descendants() {
        let inner = NodeId::next();
        let outer = NodeId::next();
        let stranger = NodeId::next();
        let tree = Element::new("div")
            .node(outer)
            .child(Element::new("span").child(Element::new("b").node(inner)));

        assert!(tree.contains(outer));
        assert!(tree.contains(inner));
        assert!(!tree.contains(stranger));
    }

    #[test]
    fn test_node_ref_is_shared_between_clones() {
        let handle = NodeRef::new();
        let clone = handle.clone();
        assert_eq!(handle.get(), None);

        let node = NodeId::next();
        clone.attach(node);
        assert_eq!(handle.get(), Some(node));
    }
}
