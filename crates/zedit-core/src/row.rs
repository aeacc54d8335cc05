//! A single line of buffer text.
//!
//! Rows never contain embedded newline terminators; line boundaries are
//! imposed by the [`TextBuffer`](crate::buffer::TextBuffer) that owns them.
//! Columns are measured in characters, with the count cached so cursor
//! clamping does not rescan the line on every keypress.

use unicode_width::UnicodeWidthChar;

/// Default tab stop width used for display measurement.
pub const TAB_STOP: usize = 8;

/// One line of text, char-addressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    text: String,
    char_len: usize,
}

impl Row {
    /// Create a row from existing text. The text must not contain `'\n'`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        debug_assert!(!text.contains('\n'));
        let char_len = text.chars().count();
        Self { text, char_len }
    }

    /// The row content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the row, returning its content.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Length of the row in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Whether the row holds no text.
    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// Byte index of the given character column, clamped to the row end.
    fn byte_index(&self, column: usize) -> usize {
        self.text
            .char_indices()
            .nth(column)
            .map(|(index, _)| index)
            .unwrap_or(self.text.len())
    }

    /// Insert `ch` before `column` (clamped to the row end).
    pub fn insert_char(&mut self, column: usize, ch: char) {
        let at = self.byte_index(column.min(self.char_len));
        self.text.insert(at, ch);
        self.char_len += 1;
    }

    /// Remove and return the character at `column`; `None` when out of bounds.
    pub fn remove_char(&mut self, column: usize) -> Option<char> {
        if column >= self.char_len {
            return None;
        }
        let at = self.byte_index(column);
        let ch = self.text.remove(at);
        self.char_len -= 1;
        Some(ch)
    }

    /// Truncate the row at `column`, returning the removed suffix.
    pub fn split_off(&mut self, column: usize) -> String {
        let at = self.byte_index(column.min(self.char_len));
        let suffix = self.text.split_off(at);
        self.char_len = self.char_len.min(column);
        suffix
    }

    /// Truncate the row at `column`, discarding the suffix.
    pub fn truncate(&mut self, column: usize) {
        let at = self.byte_index(column.min(self.char_len));
        self.text.truncate(at);
        self.char_len = self.char_len.min(column);
    }

    /// Append `tail` to the end of the row.
    pub fn append(&mut self, tail: &str) {
        debug_assert!(!tail.contains('\n'));
        self.text.push_str(tail);
        self.char_len += tail.chars().count();
    }

    /// Copy of the character range `start..end`, clamped to the row.
    pub fn substring(&self, start: usize, end: usize) -> String {
        if start >= end {
            return String::new();
        }
        self.text
            .chars()
            .skip(start)
            .take(end - start)
            .collect()
    }

    /// Visual column (display cells) of the given character column,
    /// expanding tabs to the next `tab_width` stop and counting wide
    /// characters as two cells.
    pub fn visual_x(&self, column: usize, tab_width: usize) -> usize {
        let tab_width = tab_width.max(1);
        let mut x = 0;
        for ch in self.text.chars().take(column) {
            if ch == '\t' {
                x += tab_width - (x % tab_width);
            } else {
                x += UnicodeWidthChar::width(ch).unwrap_or(1);
            }
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove_track_char_len() {
        let mut row = Row::new("ab");
        row.insert_char(1, 'x');
        assert_eq!(row.text(), "axb");
        assert_eq!(row.char_len(), 3);

        assert_eq!(row.remove_char(0), Some('a'));
        assert_eq!(row.text(), "xb");
        assert_eq!(row.remove_char(5), None);
        assert_eq!(row.char_len(), 2);
    }

    #[test]
    fn test_split_off_and_append_round_trip() {
        let mut row = Row::new("hello world");
        let tail = row.split_off(5);
        assert_eq!(row.text(), "hello");
        assert_eq!(tail, " world");

        row.append(&tail);
        assert_eq!(row.text(), "hello world");
        assert_eq!(row.char_len(), 11);
    }

    #[test]
    fn test_multibyte_columns() {
        let mut row = Row::new("héllo");
        assert_eq!(row.char_len(), 5);
        assert_eq!(row.substring(1, 2), "é");

        row.insert_char(2, 'x');
        assert_eq!(row.text(), "héxllo");
        assert_eq!(row.substring(1, 3), "éx");
    }

    #[test]
    fn test_visual_x_tab_stops() {
        let row = Row::new("\tab\tc");
        assert_eq!(row.visual_x(0, 8), 0);
        assert_eq!(row.visual_x(1, 8), 8);
        assert_eq!(row.visual_x(3, 8), 10);
        // Second tab advances to the next stop, not by a full width.
        assert_eq!(row.visual_x(4, 8), 16);
        assert_eq!(row.visual_x(4, 4), 8);
    }

    #[test]
    fn test_visual_x_wide_chars() {
        let row = Row::new("日本");
        assert_eq!(row.visual_x(2, 8), 4);
    }
}
