//! Clipboard holding the most recent copied line sequence.
//!
//! The clipboard owns independent copies of the copied text; its content
//! stays valid after the source rows are deleted or mutated, and is
//! replaced wholesale on every copy.

/// Ordered sequence of owned line copies.
#[derive(Debug, Default)]
pub struct Clipboard {
    lines: Vec<String>,
}

impl Clipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire content with a fresh copy set.
    pub fn replace(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    /// The held lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of held lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been copied yet.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
