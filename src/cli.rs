// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - gallery (default): interactive terminal gallery
// - render <component>: print a component's markup in its default configuration
// - config --show | --path | --reset

use anyhow::{Context, Result};
use canoe_ui::components::{
    Badge, Button, Card, Dots, DropZone, Input, Kbd, LogContainer, Menu, MenuItem, Modal,
    ProgressBar, Spinner, Tab, TabPanel, Tabs, Toast, ToastContainer,
};
use canoe_ui::config::{Config, VERSION};
use canoe_ui::host::Host;
use canoe_ui::markup::Element;
use canoe_ui::traits::{Component, ComponentKind};
use canoe_ui::UsageError;
use clap::{Parser, Subcommand};
use std::io::Write;

/// Canoe UI - interaction-state components for the Canoe design system
#[derive(Parser)]
#[command(name = "canoe-ui")]
#[command(version = VERSION)]
#[command(about = "Interaction-state components for the Canoe design system", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive component gallery (default)
    Gallery,

    /// Print a component's markup in its default configuration
    Render {
        /// Component name (button, badge, menu, tabs, modal, toast, dropzone, ...)
        component: String,

        /// Emit the markup tree as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli(cli: &Cli) -> Result<bool> {
    match &cli.command {
        None | Some(Commands::Gallery) => Ok(false),
        Some(Commands::Render { component, json }) => {
            let output = render_component(component, *json)?;
            println!("{}", output);
            Ok(true)
        }
        Some(Commands::Config { show, path, reset }) => {
            if *path {
                handle_config_path()?;
            } else if *show {
                handle_config_show()?;
            } else if *reset {
                handle_config_reset()?;
            } else {
                println!("Usage: canoe-ui config [--show|--path|--reset]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
                println!("  --reset   Reset config file to defaults");
            }
            Ok(true)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// render
// ─────────────────────────────────────────────────────────────────────────────

/// Render a component by name as HTML or JSON
pub fn render_component(name: &str, json: bool) -> Result<String> {
    let kind = ComponentKind::from_name(name)
        .ok_or_else(|| UsageError::UnknownComponent(name.to_string()))?;
    let element = sample(kind, &Host::new());

    if json {
        serde_json::to_string_pretty(&element).context("failed to serialise markup")
    } else {
        Ok(element.to_html())
    }
}

/// A component of the given kind in its default configuration
fn sample(kind: ComponentKind, host: &Host) -> Element {
    match kind {
        ComponentKind::Button => Button::new("Button").render(),
        ComponentKind::Badge => Badge::new("Badge").render(),
        ComponentKind::Card => Card::new()
            .child(Card::header().child(Card::title("Card")))
            .child(Card::body())
            .render(),
        ComponentKind::Input => Input::default().render(),
        ComponentKind::Kbd => Kbd::new("Ctrl+K").render(),
        ComponentKind::Spinner => Spinner::default().render(),
        ComponentKind::Dots => Dots::default().render(),
        ComponentKind::ProgressBar => ProgressBar::default().render(),
        ComponentKind::Menu => {
            let mut menu = Menu::new(host, "Actions");
            menu.add_item(MenuItem::new("Edit"));
            menu.add_item(MenuItem::new("Duplicate"));
            menu.render()
        }
        ComponentKind::Tabs => {
            let mut tabs = Tabs::new(host);
            tabs.add_tab(Tab::new("one", "One"));
            tabs.add_tab(Tab::new("two", "Two"));
            tabs.add_panel(TabPanel::new("one").child("First panel"));
            tabs.add_panel(TabPanel::new("two").child("Second panel"));
            tabs.render()
        }
        ComponentKind::Modal => Modal::new(host, || {}).render(),
        ComponentKind::Toast => Toast::new(host).message("Saved").render(),
        ComponentKind::ToastContainer => ToastContainer::default().render(),
        ComponentKind::DropZone => DropZone::default().render(),
        ComponentKind::LogContainer => LogContainer::default().render(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// config
// ─────────────────────────────────────────────────────────────────────────────

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("could not determine config path")?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let path = Config::reset_file()?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_component_renders_its_base_class() {
        for kind in ComponentKind::ALL {
            let html = render_component(kind.name(), false).unwrap();
            assert!(
                html.contains(kind.base_class()),
                "{} output missing {}: {}",
                kind.name(),
                kind.base_class(),
                html
            );
        }
    }

    #[test]
    fn test_unknown_component_is_a_usage_error() {
        let err = render_component("carousel", false).unwrap_err();
        assert_eq!(
            err.downcast_ref::<UsageError>(),
            Some(&UsageError::UnknownComponent("carousel".to_string()))
        );
    }

    #[test]
    fn test_json_output_parses() {
        let json = render_component("button", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tag"], "button");
    }

    #[test]
    fn test_cli_parses_render_flags() {
        let cli = Cli::try_parse_from(["canoe-ui", "render", "tabs", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Render { component, json }) => {
                assert_eq!(component, "tabs");
                assert!(json);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_no_subcommand_runs_gallery() {
        let cli = Cli::try_parse_from(["canoe-ui"]).unwrap();
        assert!(!handle_cli(&cli).unwrap());
    }
}
