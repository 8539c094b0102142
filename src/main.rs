// Canoe UI gallery
//
// Hosts the components in a terminal. The gallery plays the part of the
// document: it routes keys and pointer clicks, forwards document events
// to listening components, ticks timers and draws the markup state with
// ratatui.
//
// Logging never writes to the terminal while the gallery runs. Events are
// captured into a LogBuffer and shown in the gallery's own log view, with
// an optional JSON file alongside.

mod cli;
mod tui;

use anyhow::{Context, Result};
use canoe_ui::config::{Config, LogRotation, LoggingConfig};
use canoe_ui::logging::{LogBuffer, LogCaptureLayer};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Subcommands (render, config) print and exit
    if cli::handle_cli(&cli)? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env()?;

    let log_buffer = LogBuffer::new();

    // The guard must outlive the gallery so buffered lines flush
    let _file_guard = init_tracing(&config.logging, &log_buffer)?;

    tracing::info!(version = canoe_ui::config::VERSION, "gallery starting");

    tui::run_gallery(config, log_buffer).await
}

/// Install the global subscriber
///
/// Precedence for the filter: RUST_LOG env var > config file > "info".
fn init_tracing(logging: &LoggingConfig, buffer: &LogBuffer) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let capture = LogCaptureLayer::new(buffer.clone());

    if !logging.file_enabled {
        tracing_subscriber::registry()
            .with(filter)
            .with(capture)
            .try_init()
            .context("failed to install tracing subscriber")?;
        return Ok(None);
    }

    std::fs::create_dir_all(&logging.file_dir).with_context(|| {
        format!(
            "could not create log directory {}",
            logging.file_dir.display()
        )
    })?;

    let file_appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    // Writes happen on a background thread
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(capture)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(Some(guard))
}
