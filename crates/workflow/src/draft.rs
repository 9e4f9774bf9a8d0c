//! The operator's reply draft.

/// Separator placed between an existing draft and an inserted suggestion.
const INSERT_SEPARATOR: &str = "\n\n";

/// Text the operator is preparing to send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    text: String,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole draft.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Add a suggestion: an empty draft becomes the suggestion, otherwise
    /// it is appended after a blank line.
    pub fn insert(&mut self, suggestion: &str) {
        if !self.text.is_empty() {
            self.text.push_str(INSERT_SEPARATOR);
        }
        self.text.push_str(suggestion);
    }

    /// Append a typed line, joined with a single newline.
    pub fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
