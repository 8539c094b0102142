// Gallery drawing
//
// Draws each component from its current state and rendered markup, and
// records the screen region of every clickable node so pointer input can
// be turned back into propagation paths.

use super::app::{App, Focus, HitArea, Section};
use super::theme::Theme;
use canoe_ui::components::log::default_format_timestamp;
use canoe_ui::components::ToastPosition;
use canoe_ui::config::VERSION;
use canoe_ui::markup::{Element, Node, NodeId};
use canoe_ui::traits::{Component, Scrollable};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TOAST_WIDTH: u16 = 38;
const TOAST_HEIGHT: u16 = 5;

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    app.hit_areas.clear();
    record(&mut app.hit_areas, area, app.root, None);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Tab list
            Constraint::Min(6),    // Section
            Constraint::Length(1), // Status
        ])
        .split(area);

    draw_title(f, app, chunks[0]);
    draw_tabs(f, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    match app.section() {
        Section::Menu => draw_menu(f, app, body[0]),
        Section::Overlays => draw_overlays_help(f, app, body[0]),
        Section::Files => draw_dropzone(f, app, body[0]),
        Section::Logs => draw_logs(f, app, body[0]),
    }
    draw_markup(f, app, body[1]);
    draw_status(f, app, chunks[3]);

    // Overlays last so they sit on top
    draw_toasts(f, app, chunks[2]);
    if app.modal.is_open() {
        draw_modal(f, app, area);
    }
}

fn record(hits: &mut Vec<HitArea>, rect: Rect, node: NodeId, parent: Option<NodeId>) {
    hits.push(HitArea { rect, node, parent });
}

// ─────────────────────────────────────────────────────────────────────────────
// Chrome
// ─────────────────────────────────────────────────────────────────────────────

fn draw_title(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::styled(
            " Canoe UI ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("v{} gallery", VERSION), Style::default().fg(theme.muted)),
    ]);
    f.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg)), area);
}

fn draw_tabs(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::TabList && !app.modal.is_open();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.border_style(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let tabs_root = app.tabs.root_node();
    record(&mut app.hit_areas, area, tabs_root, Some(app.root));

    let active = app.tabs.active().map(str::to_owned);
    let focused_tab = app.tabs.focused_tab().map(str::to_owned);
    let tabs: Vec<(NodeId, String, String)> = app
        .tabs
        .tabs()
        .iter()
        .map(|t| (t.node(), t.id().to_string(), t.label().to_string()))
        .collect();

    let mut spans = Vec::new();
    let mut x = inner.x;
    for (index, (node, id, label)) in tabs.into_iter().enumerate() {
        let text = format!(" {} {} ", index + 1, label);
        let width = text.width() as u16;

        let mut style = Style::default().fg(app.theme.fg);
        if active.as_deref() == Some(id.as_str()) {
            style = style
                .fg(app.theme.selected_fg)
                .bg(app.theme.selected_bg)
                .add_modifier(Modifier::BOLD);
        }
        if focused && focused_tab.as_deref() == Some(id.as_str()) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }

        let rect = Rect::new(x, inner.y, width.min(inner.right().saturating_sub(x)), 1);
        record(&mut app.hit_areas, rect, node, Some(tabs_root));

        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
        x = x.saturating_add(width + 1);
    }
    f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let picker = if app.awaiting_pick {
        "  [picker open: paste a path]"
    } else {
        ""
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.focus_hint()),
            Style::default().fg(theme.accent),
        ),
        Span::styled(
            " Tab:focus  1-4:section  t:toast  o:modal  q:quit",
            Style::default().fg(theme.muted),
        ),
        Span::styled(picker, Style::default().fg(theme.warning)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn section_block<'a>(theme: &Theme, title: &'a str, focused: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(focused))
        .title(format!(" {} ", title))
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

fn draw_menu(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Section;
    let block = section_block(&app.theme, "Menu", focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let markup = app.menu.render();
    let open = markup.get_attr("data-state") == Some("open");

    let label = format!("[ {} {} ]", app.menu.trigger_label(), if open { "▴" } else { "▾" });
    let trigger = Rect::new(inner.x + 1, inner.y, (label.width() as u16).min(inner.width), 1);
    let trigger_style = if focused {
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.fg)
    };
    f.render_widget(Paragraph::new(Span::styled(label, trigger_style)), trigger);

    let menu_root = app.menu.root_node();
    let Some(content) = markup.find_class("menu-content") else {
        record(&mut app.hit_areas, trigger, menu_root, Some(app.root));
        record(&mut app.hit_areas, trigger, app.menu.trigger_node(), Some(menu_root));
        return;
    };

    let rows: Vec<&Element> = content.children.iter().filter_map(Node::as_element).collect();
    let width = inner.width.saturating_sub(2).min(32);
    let height = (rows.len() as u16 + 2).min(inner.height.saturating_sub(1));
    let panel = Rect::new(inner.x + 1, inner.y + 1, width, height);

    record(&mut app.hit_areas, trigger.union(panel), menu_root, Some(app.root));
    record(&mut app.hit_areas, trigger, app.menu.trigger_node(), Some(menu_root));
    record(&mut app.hit_areas, panel, app.menu.content_node(), Some(menu_root));

    let panel_block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.accent));
    let list_area = panel_block.inner(panel);
    f.render_widget(Clear, panel);
    f.render_widget(panel_block, panel);

    let mut lines = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let y = list_area.y + i as u16;
        if y >= list_area.bottom() {
            break;
        }
        if row.has_class("menu-separator") {
            lines.push(Line::styled(
                "─".repeat(list_area.width as usize),
                Style::default().fg(app.theme.border),
            ));
        } else if row.has_class("menu-label") {
            lines.push(Line::styled(
                row.text_content(),
                Style::default()
                    .fg(app.theme.muted)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else {
            if let Some(node) = row.node {
                let rect = Rect::new(list_area.x, y, list_area.width, 1);
                record(&mut app.hit_areas, rect, node, Some(app.menu.content_node()));
            }
            lines.push(menu_item_line(&app.theme, row, list_area.width));
        }
    }
    f.render_widget(Paragraph::new(lines), list_area);
}

fn menu_item_line(theme: &Theme, row: &Element, width: u16) -> Line<'static> {
    let text = |class: &str| row.find_class(class).map(Element::text_content);
    let icon = text("menu-item-icon").unwrap_or_else(|| " ".to_string());
    let label = text("menu-item-label").unwrap_or_default();
    let shortcut = text("menu-item-shortcut").unwrap_or_default();

    let mut style = Style::default().fg(theme.fg);
    if row.has_class("menu-item-danger") {
        style = style.fg(theme.danger);
    }
    if row.get_attr("disabled").is_some() {
        style = style.fg(theme.disabled);
    }
    if row.get_attr("tabindex") == Some("0") {
        style = style.bg(theme.selected_bg).add_modifier(Modifier::BOLD);
    }

    let left = format!("{} {}", icon, label);
    let pad = (width as usize).saturating_sub(left.width() + shortcut.width());
    Line::styled(format!("{}{}{}", left, " ".repeat(pad), shortcut), style)
}

fn draw_overlays_help(f: &mut Frame, app: &App, area: Rect) {
    let block = section_block(&app.theme, "Modal & Toasts", app.focus == Focus::Section);
    let theme = &app.theme;
    let lines = vec![
        Line::from("t   raise a toast"),
        Line::from("o   open the modal"),
        Line::from("x   dismiss the newest toast"),
        Line::from(""),
        Line::styled(
            format!(
                "Toasts: {} live, auto-dismiss after {}ms",
                app.toasts.len(),
                app.config.toast.duration.as_millis()
            ),
            Style::default().fg(theme.muted),
        ),
        Line::styled(
            format!(
                "Scroll lock: {}",
                if app.host.is_scroll_locked() { "held" } else { "free" }
            ),
            Style::default().fg(theme.muted),
        ),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_dropzone(f: &mut Frame, app: &mut App, area: Rect) {
    let markup = app.dropzone.render();
    let theme = &app.theme;

    let border = if markup.has_class("has-error") {
        theme.error
    } else if markup.has_class("drag-over") || app.awaiting_pick {
        theme.accent
    } else if app.focus == Focus::Section {
        theme.border_focused
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(border))
        .title(" Drop Zone ");

    let mut lines = Vec::new();
    let mut rows = Vec::new();
    markup.find_all_class("dropzone-file", &mut rows);
    if rows.is_empty() {
        let text = |class: &str| markup.find_class(class).map(Element::text_content);
        lines.push(Line::styled(
            text("dropzone-icon").unwrap_or_default(),
            Style::default().fg(theme.accent),
        ));
        lines.push(Line::styled(
            text("dropzone-title").unwrap_or_default(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        if let Some(subtitle) = text("dropzone-subtitle") {
            lines.push(Line::from(subtitle));
        }
        if let Some(hint) = text("dropzone-hint") {
            lines.push(Line::styled(hint, Style::default().fg(theme.muted)));
        }
    } else {
        for row in rows {
            let name = row
                .find_class("dropzone-file-name")
                .map(Element::text_content)
                .unwrap_or_default();
            let size = row
                .find_class("dropzone-file-size")
                .map(Element::text_content)
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled("▤ ", Style::default().fg(theme.accent)),
                Span::raw(truncate(&name, 40)),
                Span::styled(format!("  {}", size), Style::default().fg(theme.muted)),
            ]));
        }
        lines.push(Line::styled(
            "Backspace removes the last file",
            Style::default().fg(theme.muted),
        ));
    }
    if let Some(error) = markup.find_class("dropzone-error") {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            error.text_content(),
            Style::default().fg(theme.error),
        ));
    }

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
    record(&mut app.hit_areas, area, app.dropzone.root_node(), Some(app.root));
}

fn draw_logs(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Section;
    let follow = if app.log.is_auto_scroll() && app.log.scroll_state().is_at_bottom() {
        " LIVE"
    } else {
        ""
    };
    let title = format!("Logs ({}){}", app.log.entries().len(), follow);
    let block = section_block(&app.theme, &title, focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    app.log.set_viewport(inner.height as usize);

    let theme = &app.theme;
    let lines: Vec<Line> = if app.log.entries().is_empty() {
        vec![Line::styled("No log entries", Style::default().fg(theme.muted))]
    } else {
        app.log
            .visible_entries()
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", default_format_timestamp(&entry.timestamp)),
                        Style::default().fg(theme.muted),
                    ),
                    Span::styled(
                        format!("{:<5} ", entry.level.as_str().to_uppercase()),
                        theme.log_style(entry.level),
                    ),
                    Span::styled(
                        entry
                            .component
                            .as_deref()
                            .map(|c| format!("[{}] ", c))
                            .unwrap_or_default(),
                        Style::default().fg(theme.accent),
                    ),
                    Span::raw(truncate(&entry.message, inner.width as usize)),
                ])
            })
            .collect()
    };
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_markup(f: &mut Frame, app: &App, area: Rect) {
    let block = section_block(&app.theme, "Markup", false);
    let html = pretty_html(&app.section_markup());
    f.render_widget(
        Paragraph::new(html)
            .style(Style::default().fg(app.theme.muted))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlays
// ─────────────────────────────────────────────────────────────────────────────

fn draw_toasts(f: &mut Frame, app: &mut App, area: Rect) {
    if app.toasts.is_empty() {
        return;
    }
    let position = app.toasts.position();
    let width = TOAST_WIDTH.min(area.width);
    let x = match position {
        ToastPosition::TopLeft | ToastPosition::BottomLeft => area.x + 1,
        ToastPosition::TopCenter | ToastPosition::BottomCenter => {
            area.x + area.width.saturating_sub(width) / 2
        }
        ToastPosition::TopRight | ToastPosition::BottomRight => {
            area.right().saturating_sub(width + 1)
        }
    };

    // Newest toast nearest the anchored edge
    let mut placed = Vec::new();
    for (slot, toast) in app.toasts.toasts().iter().rev().enumerate() {
        let offset = slot as u16 * TOAST_HEIGHT;
        if offset + TOAST_HEIGHT > area.height {
            break;
        }
        let y = if position.is_top() {
            area.y + offset
        } else {
            area.bottom().saturating_sub(offset + TOAST_HEIGHT)
        };
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);
        let color = app.theme.toast_color(toast.toast_variant());
        placed.push((rect, toast.render(), color, toast.remaining_fraction()));
    }

    for (rect, markup, color, remaining) in placed {
        draw_toast(f, app, rect, &markup, color, remaining);
    }
}

fn draw_toast(
    f: &mut Frame,
    app: &mut App,
    rect: Rect,
    markup: &Element,
    color: Color,
    remaining: f64,
) {
    let theme = &app.theme;
    let mut border = Style::default().fg(color);
    if markup.has_class("toast-exiting") {
        border = border.add_modifier(Modifier::DIM);
    }

    let icon = markup
        .find_class("toast-icon")
        .map(|e| format!("{} ", e.text_content()))
        .unwrap_or_default();
    let title = markup
        .find_class("toast-title")
        .map(Element::text_content)
        .unwrap_or_default();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(border)
        .title(Span::styled(
            format!(" {}{} ", icon, title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    if markup.find_class("toast-close").is_some() {
        block = block.title_top(Line::from(" × ").right_aligned());
    }

    let mut lines = vec![Line::from(
        markup
            .find_class("toast-message")
            .map(Element::text_content)
            .unwrap_or_default(),
    )];
    if markup.find_class("toast-progress").is_some() {
        let inner_width = rect.width.saturating_sub(2) as usize;
        let filled = (remaining.clamp(0.0, 1.0) * inner_width as f64).round() as usize;
        lines.push(Line::styled(
            format!("{}{}", "━".repeat(filled), " ".repeat(inner_width - filled)),
            Style::default().fg(color),
        ));
    }

    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);

    if let Some(node) = markup.node {
        record(&mut app.hit_areas, rect, node, Some(app.root));
        if let Some(close) = markup.find_class("toast-close").and_then(|e| e.node) {
            let close_rect = Rect::new(rect.right().saturating_sub(4), rect.y, 3, 1);
            record(&mut app.hit_areas, close_rect, close, Some(node));
        }
    }
}

fn draw_modal(f: &mut Frame, app: &mut App, area: Rect) {
    let markup = app.modal.render();
    let theme = &app.theme;

    let width = (area.width / 5 * 3).clamp(20.min(area.width), area.width);
    let height = 9.min(area.height);
    let dialog = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let text = |class: &str| markup.find_class(class).map(Element::text_content);
    let title = text("modal-title").unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.accent))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_top(Line::from(" × ").right_aligned())
        .style(Style::default().bg(theme.bg));

    let lines = vec![
        Line::from(""),
        Line::from(text("modal-body").unwrap_or_default()),
        Line::from(""),
        Line::styled(
            text("modal-footer").unwrap_or_default(),
            Style::default().fg(theme.muted),
        )
        .right_aligned(),
    ];

    // Dim everything behind the dialog
    f.buffer_mut().set_style(
        area,
        Style::default()
            .fg(theme.backdrop)
            .add_modifier(Modifier::DIM),
    );
    f.render_widget(Clear, dialog);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        dialog,
    );

    let backdrop = app.modal.backdrop_node();
    let dialog_node = app.modal.dialog_node();
    record(&mut app.hit_areas, area, backdrop, Some(app.root));
    record(&mut app.hit_areas, dialog, dialog_node, Some(backdrop));
    record(
        &mut app.hit_areas,
        Rect::new(dialog.right().saturating_sub(4), dialog.y, 3, 1),
        app.modal.close_button_node(),
        Some(dialog_node),
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Truncate to a display width, appending an ellipsis when cut
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

/// HTML with one element per line, indented by depth
fn pretty_html(el: &Element) -> String {
    let mut out = String::new();
    write_pretty(el, 0, &mut out);
    out
}

fn write_pretty(el: &Element, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let shallow = Element {
        children: Vec::new(),
        ..el.clone()
    };
    let html = shallow.to_html();
    let close = format!("</{}>", el.tag);
    let open = html.strip_suffix(&close).unwrap_or(&html);

    out.push_str(&indent);
    out.push_str(open);
    out.push('\n');
    for child in &el.children {
        match child {
            Node::Element(inner) => write_pretty(inner, depth + 1, out),
            Node::Text { text } => {
                out.push_str(&indent);
                out.push_str("  ");
                out.push_str(text);
                out.push('\n');
            }
        }
    }
    if html.ends_with(&close) {
        out.push_str(&indent);
        out.push_str(&close);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canoe_ui::config::Config;
    use canoe_ui::host::events::key;
    use canoe_ui::host::Host;
    use canoe_ui::logging::LogBuffer;
    use crossterm::event::KeyCode;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(Config::default(), LogBuffer::new(), Host::new())
    }

    #[test]
    fn test_draws_tabs_and_menu_trigger() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains("Canoe UI"));
        assert!(screen.contains("1 Menu"));
        assert!(screen.contains("4 Logs"));
        assert!(screen.contains("[ Actions ▾ ]"));
    }

    #[test]
    fn test_open_menu_lists_items() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        let screen = render(&mut app);
        assert!(screen.contains("Info toast"));
        assert!(screen.contains("Quit"));
    }

    #[test]
    fn test_click_on_drawn_trigger_opens_menu() {
        let mut app = app();
        render(&mut app);
        let trigger = app
            .hit_areas
            .iter()
            .find(|a| a.node == app.menu.trigger_node())
            .map(|a| a.rect)
            .unwrap();

        app.handle_click(trigger.x, trigger.y);
        assert!(app.menu.is_open());
    }

    #[test]
    fn test_backdrop_click_closes_modal() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('o')));
        render(&mut app);

        // Inside the dialog: stays open
        let dialog = app
            .hit_areas
            .iter()
            .find(|a| a.node == app.modal.dialog_node())
            .map(|a| a.rect)
            .unwrap();
        app.handle_click(dialog.x + 2, dialog.y + 2);
        assert!(app.modal.is_open());

        // Corner of the screen: backdrop
        app.handle_click(0, 29);
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_open_modal_dims_backdrop() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('o')));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let buffer = terminal.backend().buffer();

        // Status bar corner sits behind the backdrop
        let behind = &buffer[(0, 29)];
        assert_eq!(behind.fg, app.theme.backdrop);
        assert!(behind.modifier.contains(Modifier::DIM));

        // The dialog itself is drawn undimmed
        let dialog = app
            .hit_areas
            .iter()
            .find(|a| a.node == app.modal.dialog_node())
            .map(|a| a.rect)
            .unwrap();
        let inside = &buffer[(dialog.x + 2, dialog.y + 2)];
        assert!(!inside.modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_toast_drawn_with_title() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('t')));
        let screen = render(&mut app);
        assert!(screen.contains("Info toast"));
        assert!(screen.contains("Notification #1"));
    }

    #[test]
    fn test_logs_section_shows_empty_state() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('4')));
        let screen = render(&mut app);
        assert!(screen.contains("No log entries"));
    }

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_pretty_html_indents_children() {
        let el = Element::new("div")
            .class("card")
            .child(Element::new("p").child("hi"));
        assert_eq!(
            pretty_html(&el),
            "<div class=\"card\">\n  <p>\n    hi\n  </p>\n</div>\n"
        );
    }
}
