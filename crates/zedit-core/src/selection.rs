//! Cursor positions and the selection model.
//!
//! A selection is stored in input order: `end` precedes `start` when the
//! user dragged backward. [`Selection::normalized`] reorders the endpoints
//! without mutating the stored range, and containment uses half-open
//! semantics (the end column is excluded).

use crate::buffer::TextBuffer;
use std::cmp::Ordering;

/// A (line, column) coordinate in the buffer, char-addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based row index.
    pub line: usize,
    /// Zero-based column in characters.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A selection range over the buffer, endpoints in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Anchor endpoint, set when selection started.
    pub start: Position,
    /// Live endpoint, advanced with the cursor.
    pub end: Position,
}

impl Selection {
    /// Copy of this range with `start <= end` in document order.
    pub fn normalized(&self) -> Self {
        if self.end < self.start {
            Self {
                start: self.end,
                end: self.start,
            }
        } else {
            *self
        }
    }

    /// Whether the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Half-open membership: a position is selected iff its row lies within
    /// the selected rows, excluding columns before the start on the first row
    /// and columns at or past the end on the last row.
    pub fn contains(&self, pos: Position) -> bool {
        let sel = self.normalized();
        if pos.line < sel.start.line || pos.line > sel.end.line {
            return false;
        }
        if pos.line == sel.start.line && pos.column < sel.start.column {
            return false;
        }
        if pos.line == sel.end.line && pos.column >= sel.end.column {
            return false;
        }
        true
    }
}

/// Optional selection plus the armed flag distinguishing "no selection"
/// from "selection anchored at the cursor".
#[derive(Debug, Default)]
pub struct SelectionState {
    range: Option<Selection>,
    armed: bool,
}

impl SelectionState {
    /// Anchor a selection at `pos` and arm it.
    pub fn start_at(&mut self, pos: Position) {
        self.range = Some(Selection {
            start: pos,
            end: pos,
        });
        self.armed = true;
    }

    /// Advance the live endpoint; ignored unless armed.
    pub fn update(&mut self, pos: Position) {
        if self.armed
            && let Some(sel) = &mut self.range
        {
            sel.end = pos;
        }
    }

    /// Select the whole buffer: row 0 column 0 through the end of the last
    /// row. No-op on an empty buffer.
    pub fn select_all(&mut self, buffer: &TextBuffer) {
        let count = buffer.line_count();
        if count == 0 {
            return;
        }
        self.range = Some(Selection {
            start: Position::new(0, 0),
            end: Position::new(count - 1, buffer.row_len(count - 1)),
        });
        self.armed = true;
    }

    /// Reset to the "no selection" state.
    pub fn clear(&mut self) {
        self.range = None;
        self.armed = false;
    }

    /// The current range, if any (endpoints still in input order).
    pub fn range(&self) -> Option<Selection> {
        self.range
    }

    /// Whether the selection is actively extending with the cursor.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Whether `pos` falls inside the current selection.
    pub fn contains(&self, pos: Position) -> bool {
        self.range.is_some_and(|sel| sel.contains(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(sr: usize, sc: usize, er: usize, ec: usize) -> Selection {
        Selection {
            start: Position::new(sr, sc),
            end: Position::new(er, ec),
        }
    }

    #[test]
    fn test_normalized_swaps_backward_drag() {
        let backward = sel(2, 1, 0, 3);
        let norm = backward.normalized();
        assert_eq!(norm.start, Position::new(0, 3));
        assert_eq!(norm.end, Position::new(2, 1));
        // Non-destructive: the stored range keeps input order.
        assert_eq!(backward.start, Position::new(2, 1));
    }

    #[test]
    fn test_contains_half_open() {
        let range = sel(1, 2, 3, 4);
        assert!(!range.contains(Position::new(0, 9)));
        assert!(!range.contains(Position::new(1, 1)));
        assert!(range.contains(Position::new(1, 2)));
        assert!(range.contains(Position::new(2, 0)));
        assert!(range.contains(Position::new(3, 3)));
        assert!(!range.contains(Position::new(3, 4)));
        assert!(!range.contains(Position::new(4, 0)));
    }

    #[test]
    fn test_empty_selection_contains_nothing() {
        let range = sel(1, 2, 1, 2);
        assert!(range.is_empty());
        assert!(!range.contains(Position::new(1, 2)));
    }

    #[test]
    fn test_update_requires_armed() {
        let mut state = SelectionState::default();
        state.update(Position::new(1, 1));
        assert!(state.range().is_none());

        state.start_at(Position::new(0, 0));
        state.update(Position::new(1, 1));
        assert_eq!(state.range().unwrap().end, Position::new(1, 1));

        state.clear();
        assert!(state.range().is_none());
        assert!(!state.is_armed());
    }

    #[test]
    fn test_select_all_covers_buffer() {
        let buffer = TextBuffer::from_text("ab\ncde");
        let mut state = SelectionState::default();
        state.select_all(&buffer);
        let range = state.range().unwrap();
        assert_eq!(range.start, Position::new(0, 0));
        assert_eq!(range.end, Position::new(1, 3));
        assert!(state.is_armed());
    }
}
