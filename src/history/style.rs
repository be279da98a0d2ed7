// Presentation-neutral emphasis hints
//
// The table model only says *what kind* of emphasis a piece of text wants.
// The theme decides what that looks like on screen.

/// Visual emphasis class attached to rendered text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Emphasis {
    #[default]
    Plain,
    Bold,
    Dim,
    /// Success, or a path that is currently open
    Positive,
    /// Failed operation
    Negative,
    /// Errors that need attention (error status, unreadable rows)
    Alert,
    /// Deleted paths
    Strikethrough,
}

/// A piece of display text with its emphasis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledText {
    pub text: String,
    pub emphasis: Emphasis,
}

impl StyledText {
    pub fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::Plain)
    }
}
