// pathtrail - Event history viewer for watched filesystem paths
//
// Reads the descriptor of one watched path (as produced by the monitor)
// and renders its event history as a table.
//
// Architecture:
// - history: byte-safe path decoding, shortening, row formatting, table model
// - tui (ratatui): draws the finished table model
// - config / logging: layered settings and tracing setup

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use pathtrail::config::Config;
use pathtrail::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first so logging can honour its level
    let config = Config::from_env()?;

    // The guard must stay alive for the whole run so file logs flush
    let _file_guard = logging::init(&config.logging)?;

    match cli.command {
        Commands::Show { file, plain, width } => cli::handle_show(&config, &file, plain, width),
        Commands::Config { show, path } => cli::handle_config(&config, show, path),
    }
}
