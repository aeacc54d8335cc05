//! The line store: an ordered, index-addressed sequence of rows.
//!
//! The buffer is the ground truth for document content. It performs no
//! operation logging itself; the session layer records history around the
//! mutations it drives through this type. Out-of-range indices are silent
//! no-ops, reported through the mutation's return value so the caller can
//! surface a diagnostic.

use crate::row::Row;

/// Ordered sequence of text lines plus a modification counter.
#[derive(Debug, Default)]
pub struct TextBuffer {
    rows: Vec<Row>,
    dirty: usize,
}

impl TextBuffer {
    /// Create an empty buffer with no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from file content. Each `\n`- or `\r\n`-terminated
    /// record becomes one row; no other normalization is performed.
    pub fn from_text(text: &str) -> Self {
        let rows = text
            .lines()
            .map(Row::new)
            .collect();
        Self { rows, dirty: 0 }
    }

    /// Serialize the buffer for saving: every row newline-terminated.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(row.text());
            out.push('\n');
        }
        out
    }

    /// Number of rows in the buffer.
    pub fn line_count(&self) -> usize {
        self.rows.len()
    }

    /// All rows, in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The row at `at`, if in bounds.
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// Mutable access to the row at `at`, if in bounds.
    pub fn row_mut(&mut self, at: usize) -> Option<&mut Row> {
        self.rows.get_mut(at)
    }

    /// Character length of the row at `at`; zero when out of bounds.
    pub fn row_len(&self, at: usize) -> usize {
        self.row(at).map(Row::char_len).unwrap_or(0)
    }

    /// Insert a row at `at`, shifting later rows down. Returns `false`
    /// (leaving the buffer untouched) when `at` is past the one-past-end
    /// insert position.
    pub fn insert_row(&mut self, at: usize, text: &str) -> bool {
        if at > self.rows.len() {
            return false;
        }
        self.rows.insert(at, Row::new(text));
        self.dirty += 1;
        true
    }

    /// Remove and return the row at `at`, shifting later rows up.
    /// `None` (no-op) when out of bounds.
    pub fn delete_row(&mut self, at: usize) -> Option<Row> {
        if at >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(at);
        self.dirty += 1;
        Some(row)
    }

    /// Count one in-place row mutation performed by the caller.
    pub fn touch(&mut self) {
        self.dirty += 1;
    }

    /// Number of mutations since the last load or save.
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    /// Whether unsaved modifications exist.
    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// Reset the modification counter after a load or save.
    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }
}
