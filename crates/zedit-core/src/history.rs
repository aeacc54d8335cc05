//! The operation log: reversible edit records and the undo/redo stacks.
//!
//! Every record owns independent copies of any line content it names —
//! never references into the buffer — so it stays applicable after the
//! affected row has been deleted or mutated in place.
//!
//! The log uses standard linear-undo semantics: recording a fresh edit
//! clears the redo stack. Moving a record between the two stacks (during
//! undo or redo) does not.

use crate::selection::Position;

/// One reversible unit of edit history.
///
/// `cx`/`cy` of the original design are carried as the [`Position`] at the
/// time of the edit. Line-level records carry a full copy of the affected
/// row; `Newline` carries the suffix moved to the new row by the split, and
/// is the one record rewritten in place during undo (the merged-away text is
/// re-saved so a later redo re-splits with whatever was actually merged).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// A character was inserted at `at`.
    InsertChar {
        /// Cursor position at the time of the edit (the insert column).
        at: Position,
        /// The inserted character.
        ch: char,
    },
    /// A character was deleted at `at`.
    DeleteChar {
        /// Position of the removed character.
        at: Position,
        /// The removed character.
        ch: char,
        /// Cursor position at the time of the edit. Differs from `at` for
        /// backspace, which removes the character behind the cursor.
        cursor: Position,
    },
    /// A row was inserted at `line`.
    InsertLine {
        /// Row index of the insertion.
        line: usize,
        /// Copy of the inserted row content.
        text: String,
    },
    /// A row was deleted at `line`.
    DeleteLine {
        /// Row index of the deletion.
        line: usize,
        /// Copy of the removed row content.
        text: String,
    },
    /// A row was split at `at`, moving `suffix` to the row below.
    Newline {
        /// Cursor position at the time of the split.
        at: Position,
        /// Text moved to the newly created row.
        suffix: String,
    },
}

/// Pair of vector-backed stacks holding applied and undone operations.
#[derive(Debug, Default)]
pub struct OperationLog {
    undo_stack: Vec<Operation>,
    redo_stack: Vec<Operation>,
}

impl OperationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fresh edit: push onto the undo stack and invalidate any
    /// redo history.
    pub fn record(&mut self, op: Operation) {
        self.redo_stack.clear();
        self.undo_stack.push(op);
    }

    /// Pop the most recent applied operation.
    pub fn pop_undo(&mut self) -> Option<Operation> {
        self.undo_stack.pop()
    }

    /// Return an operation to the undo stack after a redo.
    pub fn push_undo(&mut self, op: Operation) {
        self.undo_stack.push(op);
    }

    /// Pop the most recently undone operation.
    pub fn pop_redo(&mut self) -> Option<Operation> {
        self.redo_stack.pop()
    }

    /// Park an undone operation on the redo stack.
    pub fn push_redo(&mut self, op: Operation) {
        self.redo_stack.push(op);
    }

    /// Whether an operation is available to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether an operation is available to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of applied operations held.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of undone operations held.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all history, e.g. when opening a different file.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
