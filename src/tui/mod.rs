// TUI module - drawing the history table to the terminal
//
// The history pipeline produces a finished TableModel; this module only
// puts it on screen. Output is drawn once into an inline viewport below
// the cursor (no alternate screen, no event loop), or printed as plain
// text when stdout is not a terminal.

pub mod history_table;

use crate::history::TableModel;
use crate::theme::Theme;
use anyhow::{Context, Result};
use crossterm::tty::IsTty;
use ratatui::{backend::CrosstermBackend, Terminal, TerminalOptions, Viewport};
use std::io::{self, Write};

/// Whether stdout can take a drawn table
pub fn stdout_is_terminal() -> bool {
    io::stdout().is_tty()
}

/// Draw the table once into an inline viewport sized to the model
pub fn draw_inline(model: &TableModel, theme: &Theme) -> Result<()> {
    let rows = u16::try_from(model.rows.len()).unwrap_or(u16::MAX);
    let height = rows.saturating_add(history_table::CHROME_HEIGHT);

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )
    .context("Failed to create terminal")?;

    terminal
        .draw(|f| history_table::render(f, f.area(), model, theme))
        .context("Failed to draw history table")?;

    // Leave the cursor below the drawn table
    println!();
    Ok(())
}

/// Print the table as plain aligned text
pub fn print_plain(model: &TableModel) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in history_table::plain_lines(model) {
        writeln!(out, "{}", line).context("Failed to write to stdout")?;
    }
    Ok(())
}
