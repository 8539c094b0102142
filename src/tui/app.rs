// Gallery application state
//
// Owns one instance of each stateful component plus the host they share.
// Component callbacks never touch the App directly: they push a Command
// onto a shared queue, and the App applies queued commands once the
// component has returned. This keeps every callback free of re-entrant
// borrows.

use super::theme::Theme;
use canoe_ui::components::{
    modal, DropZone, FileHandle, FileInfo, FooterAlign, LogContainer, Menu, MenuItem,
    MenuItemVariant, Modal, ModalSize, Tab, TabPanel, Tabs, TabsVariant, Toast, ToastContainer,
    ToastVariant,
};
use canoe_ui::config::Config;
use canoe_ui::host::{DocumentEvent, DocumentListener, DragEvent, DragKind, Host, PointerEvent};
use canoe_ui::logging::LogBuffer;
use canoe_ui::markup::{Element, NodeId};
use canoe_ui::traits::{Component, Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

/// Gallery sections, one per tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Menu,
    Overlays,
    Files,
    Logs,
}

impl Section {
    pub const ALL: [Section; 4] = [Self::Menu, Self::Overlays, Self::Files, Self::Logs];

    /// Tab id
    pub fn id(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Overlays => "overlays",
            Self::Files => "files",
            Self::Logs => "logs",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Menu => "Menu",
            Self::Overlays => "Modal & Toasts",
            Self::Files => "Drop Zone",
            Self::Logs => "Logs",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

/// Which region receives keys that no overlay claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    TabList,
    #[default]
    Section,
}

/// Work requested by component callbacks
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ShowToast(ToastVariant),
    OpenModal,
    CloseModal,
    ClearLogs,
    Quit,
    SectionChanged(String),
    FilesSelected(Vec<FileHandle>),
    FileRemoved(String),
}

type CommandQueue = Rc<RefCell<Vec<Command>>>;

/// Screen region bound to a node, recorded while drawing
#[derive(Debug, Clone, Copy)]
pub struct HitArea {
    pub rect: Rect,
    pub node: NodeId,
    pub parent: Option<NodeId>,
}

// ─────────────────────────────────────────────────────────────────────────────
// App
// ─────────────────────────────────────────────────────────────────────────────

pub struct App {
    /// Node standing in for the whole screen
    pub root: NodeId,
    pub host: Host,
    pub config: Config,
    pub theme: Theme,

    pub tabs: Tabs,
    pub menu: Menu,
    pub modal: Modal,
    pub toasts: ToastContainer,
    pub dropzone: DropZone,
    pub log: LogContainer,

    pub focus: Focus,
    /// The next paste answers the drop zone's file picker
    pub awaiting_pick: bool,
    pub should_quit: bool,

    /// Regions drawn in the last frame, parents before children
    pub hit_areas: Vec<HitArea>,

    log_buffer: LogBuffer,
    log_generation: i64,
    selected_files: Vec<FileInfo>,
    commands: CommandQueue,
    toasts_raised: usize,
}

impl App {
    pub fn new(config: Config, log_buffer: LogBuffer, host: Host) -> Self {
        let commands: CommandQueue = Rc::new(RefCell::new(Vec::new()));

        let tabs = build_tabs(&host, &commands);
        let menu = build_menu(&host, &commands);
        let modal = build_modal(&host, &commands);
        let dropzone = build_dropzone(&commands);

        Self {
            root: NodeId::next(),
            theme: Theme::from_name(config.theme),
            toasts: ToastContainer::new(config.toast.position),
            log: LogContainer::new()
                .auto_scroll(config.log.auto_scroll)
                .show_component(true),
            tabs,
            menu,
            modal,
            dropzone,
            host,
            config,
            focus: Focus::default(),
            awaiting_pick: false,
            should_quit: false,
            hit_areas: Vec::new(),
            log_buffer,
            log_generation: 0,
            selected_files: Vec::new(),
            commands,
            toasts_raised: 0,
        }
    }

    pub fn section(&self) -> Section {
        self.tabs
            .active()
            .and_then(Section::from_id)
            .unwrap_or(Section::Menu)
    }

    /// Markup of the component the current section shows
    pub fn section_markup(&self) -> Element {
        match self.section() {
            Section::Menu => self.menu.render(),
            Section::Overlays if self.modal.is_open() => self.modal.render(),
            Section::Overlays => self.toasts.render(),
            Section::Files => self.dropzone.render(),
            Section::Logs => self.log.render(),
        }
    }

    /// Hint for the status bar from whichever component has the keys
    pub fn focus_hint(&self) -> &'static str {
        if self.modal.is_open() {
            return "Esc/Enter:close";
        }
        if self.menu.is_open() {
            return self.menu.focus_hint().unwrap_or_default();
        }
        match self.focus {
            Focus::TabList => self.tabs.focus_hint().unwrap_or_default(),
            Focus::Section => match self.section() {
                Section::Menu => "Enter:open menu",
                Section::Overlays => "t:toast  o:modal  x:dismiss",
                Section::Files => self.dropzone.focus_hint().unwrap_or_default(),
                Section::Logs => self.log.focus_hint().unwrap_or_default(),
            },
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Timers and external data
    // ─────────────────────────────────────────────────────────────

    /// Periodic tick: expire toasts and pull new log lines
    pub fn tick(&mut self) {
        let removed = self.toasts.tick();
        if removed > 0 {
            debug!(removed, "toasts removed");
        }
        self.sync_logs();
        self.apply_commands();
    }

    fn sync_logs(&mut self) {
        let generation = self.log_buffer.generation();
        if generation != self.log_generation {
            self.log_generation = generation;
            self.log.set_entries(self.log_buffer.snapshot());
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Keyboard
    // ─────────────────────────────────────────────────────────────

    /// Layered dispatch: document listeners → overlays → global → focused
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.dispatch_key(key);
        self.apply_commands();
    }

    fn dispatch_key(&mut self, key: KeyEvent) {
        // Layer 1: document-level listeners (Escape)
        let event = DocumentEvent::Key(key);
        if self.modal.on_document_event(&event).was_handled() {
            return;
        }
        if self.menu.on_document_event(&event).was_handled() {
            return;
        }

        // Layer 2: an open modal captures all input
        if self.modal.is_open() {
            if key.code == KeyCode::Enter {
                self.modal.on_close_click();
            }
            return;
        }

        // Layer 3: an open menu owns navigation keys
        if self.menu.is_open() && self.menu.handle_key(key).was_handled() {
            return;
        }

        // Layer 4: global keys
        if self.handle_global_key(key) == Handled::Yes {
            return;
        }

        // Layer 5: focused region
        match self.focus {
            Focus::TabList => {
                self.tabs.handle_key(key);
            }
            Focus::Section => self.handle_section_key(key),
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Handled::Yes
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::TabList => Focus::Section,
                    Focus::Section => Focus::TabList,
                };
                if self.focus == Focus::TabList {
                    if let Some(active) = self.tabs.active().map(str::to_owned) {
                        self.tabs.focus_tab(&active);
                    }
                }
                Handled::Yes
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                Handled::from(self.tabs.select(Section::ALL[index].id()))
            }
            KeyCode::Char('t') => {
                self.raise_toast(ToastVariant::Info);
                Handled::Yes
            }
            KeyCode::Char('o') => {
                self.modal.set_open(true);
                Handled::Yes
            }
            KeyCode::Char('x') => Handled::from(self.toasts.dismiss_latest()),
            _ => Handled::No,
        }
    }

    fn handle_section_key(&mut self, key: KeyEvent) {
        match self.section() {
            Section::Menu => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.menu.toggle();
                }
            }
            Section::Overlays => {}
            Section::Files => {
                if matches!(key.code, KeyCode::Backspace | KeyCode::Delete) {
                    if let Some(last) = self.dropzone.files().len().checked_sub(1) {
                        self.dropzone.remove_file(last);
                    }
                    return;
                }
                self.dropzone.handle_key(key);
                self.poll_picker();
            }
            Section::Logs => {
                self.log.handle_key(key);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Pointer
    // ─────────────────────────────────────────────────────────────

    /// Innermost recorded region under a cell, as a propagation path
    pub fn hit_test(&self, column: u16, row: u16) -> Option<PointerEvent> {
        let hit = self
            .hit_areas
            .iter()
            .rev()
            .find(|area| contains(area.rect, column, row))?;

        let mut ancestors = Vec::new();
        let mut parent = hit.parent;
        while let Some(node) = parent {
            ancestors.push(node);
            parent = self
                .hit_areas
                .iter()
                .find(|area| area.node == node)
                .and_then(|area| area.parent);
        }
        Some(PointerEvent::new(hit.node, ancestors))
    }

    /// Left click at a terminal cell
    pub fn handle_click(&mut self, column: u16, row: u16) {
        let Some(event) = self.hit_test(column, row) else {
            // Empty space still counts as outside the menu
            self.dispatch_pointer(PointerEvent::on(self.root));
            self.apply_commands();
            return;
        };
        self.dispatch_pointer(event);
        self.apply_commands();
    }

    fn dispatch_pointer(&mut self, event: PointerEvent) {
        self.menu
            .on_document_event(&DocumentEvent::PointerDown(event.clone()));

        if self.modal.is_open() {
            if event.target() == self.modal.close_button_node() {
                self.modal.on_close_click();
            } else {
                self.modal.on_backdrop_click(&event);
            }
            return;
        }

        let target = event.target();
        if target == self.menu.trigger_node() {
            self.menu.toggle();
        } else if self.menu.items().any(|item| item.node() == target) {
            self.menu.select(target);
        } else if self.tabs.tabs().iter().any(|tab| tab.node() == target) {
            self.tabs.click(target);
        } else if event.passes_through(self.dropzone.root_node()) {
            self.dropzone.click();
            self.poll_picker();
        } else if let Some(toast) = self
            .toasts
            .toasts()
            .iter()
            .find(|t| t.close_node() == target)
            .map(|t| t.node())
        {
            self.toasts.dismiss(toast);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Paste (terminal drag-and-drop)
    // ─────────────────────────────────────────────────────────────

    /// Dropping files onto a terminal pastes their paths
    pub fn handle_paste(&mut self, text: &str) {
        let paths = parse_pasted_paths(text);
        if paths.is_empty() {
            return;
        }

        let mut files = Vec::new();
        let mut unreadable = Vec::new();
        for path in paths {
            match FileHandle::from_path(&path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot read pasted path");
                    unreadable.push(path.display().to_string());
                }
            }
        }

        self.dropzone.set_error(if unreadable.is_empty() {
            None
        } else {
            Some(format!("Could not read {}", unreadable.join(", ")))
        });

        let root = self.dropzone.root_node();
        if std::mem::take(&mut self.awaiting_pick) {
            self.dropzone.pick_files(files);
        } else {
            self.dropzone.handle_drag(DragEvent::new(DragKind::Enter, root));
            self.dropzone.handle_drag(DragEvent::drop_files(root, files));
        }
        self.apply_commands();
    }

    fn poll_picker(&mut self) {
        if self.dropzone.take_picker_request() {
            self.awaiting_pick = true;
            info!("file picker opened; paste a path to choose a file");
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────

    fn apply_commands(&mut self) {
        loop {
            let pending = std::mem::take(&mut *self.commands.borrow_mut());
            if pending.is_empty() {
                break;
            }
            for command in pending {
                self.apply(command);
            }
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::ShowToast(variant) => self.raise_toast(variant),
            Command::OpenModal => self.modal.set_open(true),
            Command::CloseModal => self.modal.set_open(false),
            Command::ClearLogs => {
                self.log_buffer.clear();
                self.log.clear();
                self.log_generation = self.log_buffer.generation();
            }
            Command::Quit => self.should_quit = true,
            Command::SectionChanged(id) => {
                info!(section = %id, "section changed");
            }
            Command::FilesSelected(files) => {
                info!(count = files.len(), "files selected");
                self.selected_files
                    .extend(files.into_iter().map(FileInfo::from));
                self.dropzone.set_files(self.selected_files.clone());
            }
            Command::FileRemoved(name) => {
                if let Some(index) = self.selected_files.iter().position(|f| f.name == name) {
                    self.selected_files.remove(index);
                }
                self.dropzone.set_files(self.selected_files.clone());
            }
        }
    }

    fn raise_toast(&mut self, variant: ToastVariant) {
        self.toasts_raised += 1;
        let toast = Toast::new(&self.host)
            .variant(variant)
            .title(format!("{} toast", capitalize(variant.as_str())))
            .message(format!("Notification #{}", self.toasts_raised))
            .duration(self.config.toast.duration)
            .show_progress(true)
            .dismissible(true);
        self.toasts.push(toast);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Component setup
// ─────────────────────────────────────────────────────────────────────────────

fn build_tabs(host: &Host, commands: &CommandQueue) -> Tabs {
    let queue = commands.clone();
    let mut tabs = Tabs::new(host)
        .default_tab(Section::Menu.id())
        .variant(TabsVariant::Bordered)
        .on_change(move |id| {
            queue
                .borrow_mut()
                .push(Command::SectionChanged(id.to_string()));
        });
    for section in Section::ALL {
        tabs.add_tab(Tab::new(section.id(), section.title()));
        tabs.add_panel(TabPanel::new(section.id()).child(section.title()));
    }
    tabs
}

fn build_menu(host: &Host, commands: &CommandQueue) -> Menu {
    let mut menu = Menu::new(host, "Actions").min_width("24ch");
    let item = |label: &str, command: Command| {
        let queue = commands.clone();
        MenuItem::new(label).on_select(move || queue.borrow_mut().push(command.clone()))
    };

    menu.add_label("Notify");
    menu.add_item(item("Info toast", Command::ShowToast(ToastVariant::Info)).icon("ℹ"));
    menu.add_item(item("Success toast", Command::ShowToast(ToastVariant::Success)).icon("✓"));
    menu.add_item(item("Warning toast", Command::ShowToast(ToastVariant::Warning)).icon("⚠"));
    menu.add_item(item("Error toast", Command::ShowToast(ToastVariant::Error)).icon("✕"));
    menu.add_separator();
    menu.add_label("Dialogs");
    menu.add_item(item("Open modal", Command::OpenModal).shortcut("o"));
    menu.add_item(MenuItem::new("Print").disabled(true));
    menu.add_separator();
    menu.add_item(item("Clear logs", Command::ClearLogs).variant(MenuItemVariant::Danger));
    menu.add_item(
        item("Quit", Command::Quit)
            .variant(MenuItemVariant::Danger)
            .shortcut("q"),
    );
    menu
}

fn build_modal(host: &Host, commands: &CommandQueue) -> Modal {
    let queue = commands.clone();
    let mut modal = Modal::new(host, move || queue.borrow_mut().push(Command::CloseModal))
        .size(ModalSize::Sm);
    let close = modal.close_button();
    modal.set_content(vec![
        modal::header()
            .child(modal::title("Canoe modal"))
            .child(close)
            .into(),
        modal::body()
            .child("Scrolling is locked while this dialog is open.")
            .into(),
        modal::footer(FooterAlign::Right)
            .child("Esc, Enter or a backdrop click closes it.")
            .into(),
    ]);
    modal
}

fn build_dropzone(commands: &CommandQueue) -> DropZone {
    let dropped = commands.clone();
    let removed = commands.clone();
    DropZone::new()
        .multiple(true)
        .hint("Drag files onto the terminal to paste their paths")
        .on_drop(move |files| dropped.borrow_mut().push(Command::FilesSelected(files)))
        .on_remove(move |file| {
            removed
                .borrow_mut()
                .push(Command::FileRemoved(file.name.clone()));
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split pasted text into paths: one per line, or whitespace separated
/// when quoted or escaped the way terminals paste dropped files
pub fn parse_pasted_paths(text: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut current = String::new();
        let mut quote: Option<char> = None;
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            match (c, quote) {
                ('\'' | '"', None) => quote = Some(c),
                (q, Some(open)) if q == open => quote = None,
                ('\\', None) => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                }
                (' ', None) => {
                    if !current.is_empty() {
                        paths.push(PathBuf::from(std::mem::take(&mut current)));
                    }
                }
                _ => current.push(c),
            }
        }
        if !current.is_empty() {
            paths.push(PathBuf::from(current));
        }
    }
    paths
}
