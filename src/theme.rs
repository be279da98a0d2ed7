// Theme support for the history table
//
// Maps the presentation-neutral emphasis hints of the table model onto
// ratatui styles. "auto" uses the terminal's ANSI palette, "mono" uses only
// modifiers for terminals without color.

use crate::history::Emphasis;
use ratatui::style::{Color, Modifier, Style};

/// Color palette for the history table
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,

    // Emphasis colors
    pub positive: Color,
    pub negative: Color,
    pub alert: Color,
    pub dim: Color,

    // UI element colors
    pub title: Color,
    pub border: Color,
    pub column_header: Color,
    /// Background of every other row; `Color::Reset` disables striping
    pub zebra: Color,
}

impl Theme {
    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "mono" | "monochrome" => Self::mono(),
            _ => Self::auto(), // "auto" or unknown
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            positive: Color::Green,
            negative: Color::Red,
            alert: Color::Red,
            dim: Color::DarkGray,
            title: Color::Cyan,
            border: Color::White,
            column_header: Color::Yellow,
            zebra: Color::Rgb(0x1c, 0x1c, 0x1c),
        }
    }

    /// Monochrome theme - modifiers only
    pub fn mono() -> Self {
        Self {
            name: "mono".to_string(),
            positive: Color::Reset,
            negative: Color::Reset,
            alert: Color::Reset,
            dim: Color::Reset,
            title: Color::Reset,
            border: Color::Reset,
            column_header: Color::Reset,
            zebra: Color::Reset,
        }
    }

    /// Style for an emphasis hint
    pub fn style(&self, emphasis: Emphasis) -> Style {
        match emphasis {
            Emphasis::Plain => Style::default(),
            Emphasis::Bold => Style::default().add_modifier(Modifier::BOLD),
            Emphasis::Dim => Style::default().fg(self.dim).add_modifier(Modifier::DIM),
            Emphasis::Positive => Style::default()
                .fg(self.positive)
                .add_modifier(Modifier::BOLD),
            Emphasis::Negative => Style::default().fg(self.negative),
            Emphasis::Alert => Style::default()
                .fg(self.alert)
                .add_modifier(Modifier::BOLD),
            Emphasis::Strikethrough => Style::default().add_modifier(Modifier::CROSSED_OUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_falls_back_to_auto() {
        assert_eq!(Theme::by_name("no-such-theme").name, "auto");
        assert_eq!(Theme::by_name("MONO").name, "mono");
    }

    #[test]
    fn test_emphasis_styles() {
        let theme = Theme::auto();
        assert_eq!(theme.style(Emphasis::Plain), Style::default());
        assert_eq!(theme.style(Emphasis::Alert).fg, Some(Color::Red));
        assert!(theme
            .style(Emphasis::Strikethrough)
            .add_modifier
            .contains(Modifier::CROSSED_OUT));
    }
}
