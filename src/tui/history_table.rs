//! History table widget
//!
//! Draws a finished [`TableModel`]: a header line above a bordered table
//! with the fixed Timestamp / Event / Result / Details columns. Notice rows
//! (empty history, unreadable events, load failures) are placed in the
//! Details column since ratatui tables have no column spans.

use crate::history::table::Column;
use crate::history::{Emphasis, TableHeader, TableModel, TableRow};
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Minimum width of the flexible Details column
const MIN_DETAILS_WIDTH: u16 = 10;

/// Lines taken by everything except the rows: header line, borders, titles
pub const CHROME_HEIGHT: u16 = 4;

/// Render the header line and the table into `area`
pub fn render(f: &mut Frame, area: Rect, model: &TableModel, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    f.render_widget(Paragraph::new(header_line(&model.header, theme)), chunks[0]);
    f.render_widget(table_widget(model, theme), chunks[1]);
}

/// Styled `Details for: <path> | Status: <STATUS>` line
pub fn header_line(header: &TableHeader, theme: &Theme) -> Line<'static> {
    Line::from(
        header
            .spans()
            .into_iter()
            .map(|span| Span::styled(span.text, theme.style(span.emphasis)))
            .collect::<Vec<_>>(),
    )
}

/// Build the table widget for a model
pub fn table_widget(model: &TableModel, theme: &Theme) -> Table<'static> {
    let columns = model.columns();

    let titles = Row::new(columns.iter().map(|c| Cell::from(c.title))).style(
        Style::default()
            .fg(theme.column_header)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = model
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let cells = match row {
                TableRow::Event(event) => vec![
                    Cell::from(event.timestamp_text.clone()),
                    Cell::from(event.type_text.clone()),
                    Cell::from(Span::styled(
                        event.outcome_text(),
                        theme.style(event.outcome.emphasis()),
                    )),
                    Cell::from(event.details_text.clone()),
                ],
                TableRow::Notice(notice) => vec![
                    Cell::default(),
                    Cell::default(),
                    Cell::default(),
                    Cell::from(Span::styled(
                        notice.text.clone(),
                        theme.style(notice.emphasis),
                    )),
                ],
            };
            // Zebra stripes
            let style = if idx % 2 == 1 {
                Style::default().bg(theme.zebra)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    Table::new(rows, column_constraints(columns))
        .header(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(
                    " Event History ",
                    Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
                )),
        )
}

fn column_constraints(columns: &[Column]) -> Vec<Constraint> {
    columns
        .iter()
        .map(|c| match c.width {
            Some(w) => Constraint::Length(w),
            None => Constraint::Min(MIN_DETAILS_WIDTH),
        })
        .collect()
}

// ============================================================================
// Plain text rendering
// ============================================================================

/// Render the model as aligned plain text lines (no colors)
///
/// Fixed columns are padded or cut by display width so emoji icons line up;
/// the Details column is left as is.
pub fn plain_lines(model: &TableModel) -> Vec<String> {
    let columns = model.columns();
    let mut lines = Vec::with_capacity(model.rows.len() + 2);

    lines.push(model.header.plain_text());
    lines.push(join_cells(
        columns,
        columns.iter().map(|c| c.title.to_string()).collect(),
    ));

    for row in &model.rows {
        let line = match row {
            TableRow::Event(event) => join_cells(
                columns,
                vec![
                    event.timestamp_text.clone(),
                    event.type_text.clone(),
                    event.outcome_text().to_string(),
                    event.details_text.clone(),
                ],
            ),
            TableRow::Notice(notice) => match notice.emphasis {
                Emphasis::Alert => format!("!! {}", notice.text),
                _ => notice.text.clone(),
            },
        };
        lines.push(line);
    }
    lines
}

fn join_cells(columns: &[Column], cells: Vec<String>) -> String {
    columns
        .iter()
        .zip(cells)
        .map(|(column, cell)| match column.width {
            Some(w) => fit_width(&cell, usize::from(w)),
            None => cell,
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// Cut `text` to `width` display columns (with an ellipsis) and pad it
fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_width = 0;

    if text.width() > width {
        // Leave room for the ellipsis
        let target_width = width.saturating_sub(1);
        for c in text.chars() {
            let char_width = c.width().unwrap_or(0);
            if current_width + char_width > target_width {
                break;
            }
            current_width += char_width;
            out.push(c);
        }
        out.push('…');
        current_width += 1;
    } else {
        out.push_str(text);
        current_width = text.width();
    }

    out.extend(std::iter::repeat(' ').take(width.saturating_sub(current_width)));
    out
}
