// TUI module - component gallery
//
// Sets up the terminal, runs the event loop and restores the terminal on
// exit. Keys, left clicks and pastes are forwarded to the App; timer ticks
// advance toasts and pull new log entries.

pub mod app;
pub mod theme;
pub mod ui;

use anyhow::{Context, Result};
use app::{App, Section};
use canoe_ui::config::Config;
use canoe_ui::host::Host;
use canoe_ui::logging::LogBuffer;
use canoe_ui::traits::Scrollable;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Run the gallery until the user quits
pub async fn run_gallery(config: Config, log_buffer: LogBuffer) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
    .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let tick_rate = config.tick_rate;
    let mut app = App::new(config, log_buffer, Host::new());

    let result = run_event_loop(&mut terminal, &mut app, tick_rate).await;

    // Restore even when the loop failed
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    tracing::info!("gallery closed");
    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick_rate);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => app.handle_key(key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        Ok(Event::Paste(text)) => app.handle_paste(&text),
                        Ok(_) => {}
                        Err(e) => tracing::warn!(error = %e, "failed to read terminal event"),
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.handle_click(mouse.column, mouse.row),
        MouseEventKind::ScrollUp if app.section() == Section::Logs && !app.modal.is_open() => {
            app.log.scroll_up();
        }
        MouseEventKind::ScrollDown if app.section() == Section::Logs && !app.modal.is_open() => {
            app.log.scroll_down();
        }
        _ => {}
    }
}
