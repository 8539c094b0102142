//! DropZone component
//!
//! Turns two input paths, drag-and-drop onto the zone and the hidden file
//! picker, into one `on_drop(Vec<FileHandle>)` notification.

use crate::host::events::is_activation;
use crate::host::{DragEvent, DragKind};
use crate::markup::{class_names, Element, Node, NodeId, NodeRef};
use crate::traits::{Component, ComponentKind, Handled, Interactive};
use crossterm::event::KeyEvent;
use std::path::{Path, PathBuf};
use tracing::debug;

// ─────────────────────────────────────────────────────────────────────────────
// File descriptors
// ─────────────────────────────────────────────────────────────────────────────

/// A file offered by a drop or the picker
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    pub path: Option<PathBuf>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            path: None,
        }
    }

    /// Describe a file on disk from its metadata
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            size: metadata.len(),
            path: Some(path.to_path_buf()),
        })
    }
}

/// Read-only projection of a selected file, owned by the host
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileInfo {
    pub file: FileHandle,
    pub name: String,
    pub size: u64,
}

impl From<FileHandle> for FileInfo {
    fn from(file: FileHandle) -> Self {
        Self {
            name: file.name.clone(),
            size: file.size,
            file,
        }
    }
}

/// Human-readable byte count: one decimal, trailing `.0` dropped
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut exponent = 0;
    while exponent < UNITS.len() - 1 && bytes >= 1024u64.pow(exponent as u32 + 1) {
        exponent += 1;
    }
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[exponent])
    } else {
        format!("{:.1} {}", rounded, UNITS[exponent])
    }
}

/// One selected-file row
pub fn render_file(file: &FileInfo, removable: bool) -> Element {
    Element::new("div")
        .class("dropzone-file")
        .child(Element::new("span").class("dropzone-file-icon").child("▤"))
        .child(
            Element::new("div")
                .class("dropzone-file-info")
                .child(
                    Element::new("p")
                        .class("dropzone-file-name")
                        .child(file.name.as_str()),
                )
                .child(
                    Element::new("p")
                        .class("dropzone-file-size")
                        .child(format_file_size(file.size)),
                ),
        )
        .child_if(removable, || {
            Element::new("button")
                .class("dropzone-file-remove")
                .attr("type", "button")
                .attr("aria-label", format!("Remove {}", file.name))
                .child("×")
                .into()
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// DropZone
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZoneSize {
    Sm,
    Md,
    Lg,
}

impl DropZoneSize {
    fn as_str(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

pub struct DropZone {
    root: NodeId,
    input: NodeId,
    accept: Option<String>,
    multiple: bool,
    size: Option<DropZoneSize>,
    disabled: bool,
    error: Option<String>,
    title: String,
    subtitle: String,
    hint: Option<String>,
    icon: Option<String>,
    class: String,
    files: Vec<FileInfo>,
    on_drop: Option<Box<dyn FnMut(Vec<FileHandle>)>>,
    on_remove: Option<Box<dyn FnMut(&FileInfo)>>,

    is_drag_over: bool,
    /// Current value of the hidden file input
    input_value: String,
    picker_requested: bool,
}

impl DropZone {
    pub fn new() -> Self {
        Self {
            root: NodeId::next(),
            input: NodeId::next(),
            accept: None,
            multiple: false,
            size: None,
            disabled: false,
            error: None,
            title: "Drop file here".to_string(),
            subtitle: "or click to browse".to_string(),
            hint: None,
            icon: None,
            class: String::new(),
            files: Vec::new(),
            on_drop: None,
            on_remove: None,
            is_drag_over: false,
            input_value: String::new(),
            picker_requested: false,
        }
    }

    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn size(mut self, size: DropZoneSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
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

    pub fn on_drop(mut self, callback: impl FnMut(Vec<FileHandle>) + 'static) -> Self {
        self.on_drop = Some(Box::new(callback));
        self
    }

    pub fn on_remove(mut self, callback: impl FnMut(&FileInfo) + 'static) -> Self {
        self.on_remove = Some(Box::new(callback));
        self
    }

    // ─────────────────────────────────────────────────────────────
    // Host-supplied props
    // ─────────────────────────────────────────────────────────────

    pub fn set_files(&mut self, files: Vec<FileInfo>) {
        self.files = files;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Disabling also cancels any drag highlight
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.is_drag_over = false;
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────

    pub fn is_drag_over(&self) -> bool {
        self.is_drag_over
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn files(&self) -> &[FileInfo] {
        &self.files
    }

    pub fn root_node(&self) -> NodeId {
        self.root
    }

    pub fn input_node(&self) -> NodeId {
        self.input
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    /// Consume a pending request to open the file picker
    pub fn take_picker_request(&mut self) -> bool {
        std::mem::take(&mut self.picker_requested)
    }

    // ─────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────

    /// Drag event dispatched to the zone's root handler
    pub fn handle_drag(&mut self, event: DragEvent) {
        match event.kind {
            DragKind::Enter | DragKind::Over => {
                if !self.disabled {
                    self.is_drag_over = true;
                }
            }
            DragKind::Leave => {
                // Leaving a descendant re-enters the zone; ignore it
                if event.target == self.root {
                    self.is_drag_over = false;
                }
            }
            DragKind::Drop => {
                self.is_drag_over = false;
                if self.disabled || event.files.is_empty() {
                    return;
                }
                let mut files = event.files;
                if !self.multiple {
                    files.truncate(1);
                }
                self.forward(files);
            }
        }
    }

    /// Selection made in the file picker
    ///
    /// The input value is cleared after every change so picking the same
    /// file again still fires.
    pub fn pick_files(&mut self, files: Vec<FileHandle>) -> bool {
        if self.disabled || files.is_empty() {
            return false;
        }
        self.input_value = files
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.handle_input_change(files);
        true
    }

    fn handle_input_change(&mut self, files: Vec<FileHandle>) {
        if !files.is_empty() {
            self.forward(files);
        }
        self.input_value.clear();
    }

    fn forward(&mut self, files: Vec<FileHandle>) {
        debug!(count = files.len(), "files selected");
        if let Some(callback) = self.on_drop.as_mut() {
            callback(files);
        }
    }

    /// Pointer activation of the zone
    pub fn click(&mut self) {
        if !self.disabled {
            self.picker_requested = true;
        }
    }

    /// Remove button of the file row at `index`
    pub fn remove_file(&mut self, index: usize) -> bool {
        let Some(file) = self.files.get(index) else {
            return false;
        };
        debug!(file = %file.name, "file removal requested");
        match self.on_remove.as_mut() {
            Some(callback) => {
                callback(file);
                true
            }
            None => false,
        }
    }
}

impl Default for DropZone {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DropZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropZone")
            .field("root", &self.root)
            .field("multiple", &self.multiple)
            .field("disabled", &self.disabled)
            .field("is_drag_over", &self.is_drag_over)
            .field("files", &self.files)
            .finish_non_exhaustive()
    }
}

impl Component for DropZone {
    fn kind(&self) -> ComponentKind {
        ComponentKind::DropZone
    }

    fn render(&self) -> Element {
        let size_class = self
            .size
            .map(|s| format!("dropzone-{}", s.as_str()))
            .unwrap_or_default();
        let has_files = !self.files.is_empty();

        let mut root = Element::new("div")
            .node(self.root)
            .class(&class_names(&[
                "dropzone",
                &size_class,
                if self.is_drag_over { "drag-over" } else { "" },
                if has_files { "has-file" } else { "" },
                if self.error.is_some() { "has-error" } else { "" },
                if self.disabled { "disabled" } else { "" },
                &self.class,
            ]))
            .attr("role", "button")
            .attr("tabindex", if self.disabled { "-1" } else { "0" })
            .attr("aria-disabled", self.disabled.to_string())
            .attr_if(self.error.is_some(), "aria-describedby", "dropzone-error")
            .child(
                Element::new("input")
                    .node(self.input)
                    .class("dropzone-input")
                    .attr("type", "file")
                    .attr_if(
                        self.accept.is_some(),
                        "accept",
                        self.accept.clone().unwrap_or_default(),
                    )
                    .attr_if(self.multiple, "multiple", "")
                    .attr_if(self.disabled, "disabled", "")
                    .attr("value", self.input_value.as_str())
                    .attr("tabindex", "-1")
                    .attr("aria-hidden", "true"),
            );

        if has_files {
            let removable = self.on_remove.is_some();
            root = root.child(
                Element::new("div")
                    .class(if self.multiple { "dropzone-files" } else { "" })
                    .children(
                        self.files
                            .iter()
                            .map(|f| Node::from(render_file(f, removable))),
                    ),
            );
        } else {
            root = root
                .child(
                    Element::new("span")
                        .class("dropzone-icon")
                        .child(self.icon.clone().unwrap_or_else(|| "⇪".to_string())),
                )
                .child(
                    Element::new("div")
                        .class("dropzone-text")
                        .child(
                            Element::new("p")
                                .class("dropzone-title")
                                .child(self.title.as_str()),
                        )
                        .child_if(!self.subtitle.is_empty(), || {
                            Element::new("p")
                                .class("dropzone-subtitle")
                                .child(self.subtitle.as_str())
                                .into()
                        })
                        .child_if(self.hint.is_some(), || {
                            Element::new("p")
                                .class("dropzone-hint")
                                .child(self.hint.clone().unwrap_or_default())
                                .into()
                        }),
                );
        }

        root.child_if(self.error.is_some(), || {
            Element::new("p")
                .class("dropzone-error")
                .attr("id", "dropzone-error")
                .attr("role", "alert")
                .child(self.error.clone().unwrap_or_default())
                .into()
        })
    }
}

impl Interactive for DropZone {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if is_activation(key.code) && !self.disabled {
            self.picker_requested = true;
            return Handled::Yes;
        }
        Handled::No
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("Enter:browse  paste a path to drop")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::events::key;
    use crossterm::event::KeyCode;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn three_files() -> Vec<FileHandle> {
        vec![
            FileHandle::new("a.json", 10),
            FileHandle::new("b.json", 20),
            FileHandle::new("c.json", 30),
        ]
    }

    fn recording(zone: DropZone) -> (DropZone, Rc<RefCell<Vec<Vec<String>>>>) {
        let drops = Rc::new(RefCell::new(Vec::new()));
        let sink = drops.clone();
        let zone = zone.on_drop(move |files| {
            sink.borrow_mut()
                .push(files.into_iter().map(|f| f.name).collect())
        });
        (zone, drops)
    }

    #[test]
    fn test_single_drop_keeps_first_file() {
        let (mut zone, drops) = recording(DropZone::new());
        let root = zone.root_node();
        zone.handle_drag(DragEvent::drop_files(root, three_files()));
        assert_eq!(*drops.borrow(), vec![vec!["a.json".to_string()]]);
    }

    #[test]
    fn test_multiple_drop_keeps_all_in_order() {
        let (mut zone, drops) = recording(DropZone::new().multiple(true));
        let root = zone.root_node();
        zone.handle_drag(DragEvent::drop_files(root, three_files()));
        assert_eq!(drops.borrow()[0], vec!["a.json", "b.json", "c.json"]);
    }

    #[test]
    fn test_drag_over_tracking() {
        let mut zone = DropZone::new();
        let root = zone.root_node();
        let child = NodeId::next();

        zone.handle_drag(DragEvent::new(DragKind::Enter, root));
        assert!(zone.is_drag_over());

        // Leaving a descendant does not clear the highlight
        zone.handle_drag(DragEvent::new(DragKind::Leave, child));
        assert!(zone.is_drag_over());

        zone.handle_drag(DragEvent::new(DragKind::Leave, root));
        assert!(!zone.is_drag_over());

        zone.handle_drag(DragEvent::new(DragKind::Over, child));
        assert!(zone.is_drag_over());
        zone.handle_drag(DragEvent::drop_files(child, Vec::new()));
        assert!(!zone.is_drag_over());
    }

    #[test]
    fn test_disabled_suppresses_everything() {
        let (zone, drops) = recording(DropZone::new());
        let mut zone = zone.disabled(true);
        let root = zone.root_node();

        zone.handle_drag(DragEvent::new(DragKind::Enter, root));
        assert!(!zone.is_drag_over());
        zone.handle_drag(DragEvent::drop_files(root, three_files()));
        assert!(drops.borrow().is_empty());

        zone.click();
        assert_eq!(zone.handle_key(key(KeyCode::Enter)), Handled::No);
        assert!(!zone.take_picker_request());
    }

    #[test]
    fn test_disabling_clears_drag_over() {
        let mut zone = DropZone::new();
        zone.handle_drag(DragEvent::new(DragKind::Enter, zone.root_node()));
        zone.set_disabled(true);
        assert!(!zone.is_drag_over());
    }

    #[test]
    fn test_picker_forwards_all_and_allows_reselecting() {
        let (mut zone, drops) = recording(DropZone::new());

        assert!(zone.pick_files(vec![FileHandle::new("a.json", 1)]));
        assert_eq!(zone.input_value(), "");
        assert!(zone.pick_files(vec![FileHandle::new("a.json", 1)]));
        assert_eq!(drops.borrow().len(), 2);

        // The picker path is not limited by `multiple`
        zone.pick_files(three_files());
        assert_eq!(drops.borrow()[2].len(), 3);
    }

    #[test]
    fn test_picker_forwards_file_with_empty_name() {
        let (mut zone, drops) = recording(DropZone::new());

        assert!(zone.pick_files(vec![FileHandle::new("", 10)]));
        assert_eq!(drops.borrow().len(), 1);
        assert_eq!(drops.borrow()[0], vec![String::new()]);

        // Empty selections and a disabled zone still forward nothing
        assert!(!zone.pick_files(Vec::new()));
        zone.set_disabled(true);
        assert!(!zone.pick_files(vec![FileHandle::new("b.csv", 3)]));
        assert_eq!(drops.borrow().len(), 1);
    }

    #[test]
    fn test_keyboard_and_click_request_picker() {
        let mut zone = DropZone::new();
        assert_eq!(zone.handle_key(key(KeyCode::Char(' '))), Handled::Yes);
        assert!(zone.take_picker_request());
        assert!(!zone.take_picker_request());

        zone.click();
        assert!(zone.take_picker_request());
    }

    #[test]
    fn test_remove_file_reports_info() {
        let removed = Rc::new(RefCell::new(Vec::new()));
        let sink = removed.clone();
        let mut zone = DropZone::new().on_remove(move |f| sink.borrow_mut().push(f.name.clone()));
        zone.set_files(vec![FileHandle::new("x.log", 2048).into()]);

        assert!(zone.remove_file(0));
        assert!(!zone.remove_file(3));
        assert_eq!(*removed.borrow(), vec!["x.log"]);
        // The host owns the list
        assert_eq!(zone.files().len(), 1);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn test_default_render() {
        let el = DropZone::new().render();
        assert_eq!(el.class_attr(), "dropzone");
        assert_eq!(el.get_attr("tabindex"), Some("0"));
        assert_eq!(
            el.find_class("dropzone-title").unwrap().text_content(),
            "Drop file here"
        );
        assert_eq!(
            el.find_class("dropzone-subtitle").unwrap().text_content(),
            "or click to browse"
        );
        assert!(el.find_class("dropzone-error").is_none());
    }

    #[test]
    fn test_render_state_classes() {
        let mut zone = DropZone::new()
            .size(DropZoneSize::Lg)
            .multiple(true)
            .on_remove(|_| {});
        zone.set_files(vec![FileHandle::new("a.txt", 1536).into()]);
        zone.set_error(Some("Too large".to_string()));
        zone.handle_drag(DragEvent::new(DragKind::Enter, zone.root_node()));

        let el = zone.render();
        assert_eq!(
            el.class_attr(),
            "dropzone dropzone-lg drag-over has-file has-error"
        );
        assert_eq!(el.get_attr("aria-describedby"), Some("dropzone-error"));
        assert!(el.find_class("dropzone-files").is_some());
        assert_eq!(
            el.find_class("dropzone-file-size").unwrap().text_content(),
            "1.5 KB"
        );
        assert_eq!(
            el.find_class("dropzone-file-remove")
                .unwrap()
                .get_attr("aria-label"),
            Some("Remove a.txt")
        );
        assert_eq!(
            el.find_class("dropzone-error").unwrap().get_attr("role"),
            Some("alert")
        );
    }

    #[test]
    fn test_file_handle_from_path() {
        let dir = std::env::temp_dir().join(format!("canoe-ui-dz-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.bin");
        std::fs::write(&path, [0u8; 2048]).unwrap();

        let handle = FileHandle::from_path(&path).unwrap();
        assert_eq!(handle.name, "sample.bin");
        assert_eq!(handle.size, 2048);
        assert_eq!(handle.path.as_deref(), Some(path.as_path()));

        std::fs::remove_dir_all(&dir).unwrap();
        assert!(FileHandle::from_path(&path).is_err());
    }
}
