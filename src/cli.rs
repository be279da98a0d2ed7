// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - show <FILE>: render the event history table of a watched-path descriptor
// - config --show: Display effective configuration
// - config --path: Show config file path

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pathtrail::config::{Config, VERSION};
use pathtrail::history::Severity;
use pathtrail::theme::Theme;
use pathtrail::tui;
use std::path::{Path, PathBuf};

/// pathtrail - event history viewer for watched filesystem paths
#[derive(Parser)]
#[command(name = "pathtrail")]
#[command(version = VERSION)]
#[command(about = "Event history viewer for watched filesystem paths", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the event history table for a watched-path descriptor (JSON)
    Show {
        /// Descriptor file as written by the monitor
        file: PathBuf,

        /// Print plain aligned text instead of drawing the table
        #[arg(long)]
        plain: bool,

        /// Override the character budget for paths and details
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        width: Option<u16>,
    },

    /// Inspect configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

pub fn handle_show(config: &Config, file: &Path, plain: bool, width: Option<u16>) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read descriptor {}", file.display()))?;
    let descriptor: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Descriptor {} is not valid JSON", file.display()))?;

    let mut config = config.clone();
    if let Some(width) = width {
        config.max_width = usize::from(width);
    }

    let build = config.table_builder().build_from_json(&descriptor);

    if plain || !tui::stdout_is_terminal() {
        tui::print_plain(&build.model)?;
    } else {
        tui::draw_inline(&build.model, &Theme::by_name(&config.theme))?;
    }

    // Non-fatal: the error rows are already on screen
    if let Some(notification) = build.notification() {
        let label = match notification.severity {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        };
        eprintln!("{}: {}", label, notification.message);
    }

    Ok(())
}

pub fn handle_config(config: &Config, show: bool, path: bool) -> Result<()> {
    if path {
        let path = Config::config_path().context("Could not determine config path")?;
        println!("{}", path.display());
    } else if show {
        println!("# Effective configuration (env > file > defaults)");
        println!();
        print!("{}", config.to_toml()?);
    } else {
        // No flag provided, show help
        println!("Usage: pathtrail config [--show|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
    }
    Ok(())
}
