//! The edit session: a single owned aggregate of buffer, operation log,
//! selection, clipboard, and mode state.
//!
//! All editing flows through the logged primitives in this module, each of
//! which pushes exactly one [`Operation`] and invalidates redo history.
//! Undo and redo replay inverse/forward effects directly against the buffer,
//! bypassing the logging entry points so that replay never corrupts the log.

use crate::buffer::TextBuffer;
use crate::clipboard::Clipboard;
use crate::command::{ExCommand, parse_command};
use crate::history::{Operation, OperationLog};
use crate::keymap::{Mode, PendingTrigger};
use crate::selection::{Position, SelectionState};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

/// A cursor movement request, decoded from input by the mode machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// One column left; wraps to the end of the previous line.
    Left,
    /// One column right; wraps to the start of the next line.
    Right,
    /// One line up, clamping the column.
    Up,
    /// One line down, clamping the column.
    Down,
    /// Column zero.
    LineStart,
    /// One past the last character of the line.
    LineEnd,
    /// Up by one page of lines.
    PageUp,
    /// Down by one page of lines.
    PageDown,
}

/// The current status-line text and when it was set.
///
/// The front-end decides how long to show it; the session only records the
/// timestamp of the last change.
#[derive(Debug)]
pub struct StatusMessage {
    text: String,
    since: Instant,
}

impl StatusMessage {
    fn new() -> Self {
        Self {
            text: String::new(),
            since: Instant::now(),
        }
    }

    /// The message text; empty when nothing is pending.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// When the message was last set.
    pub fn since(&self) -> Instant {
        self.since
    }
}

/// The editing session owning all core state.
///
/// Created once at editor start; the front-end drives it through
/// [`process_key`](EditSession::process_key) and reads back cursor, mode,
/// selection, and status for display.
#[derive(Debug)]
pub struct EditSession {
    buffer: TextBuffer,
    log: OperationLog,
    selection: SelectionState,
    clipboard: Clipboard,
    mode: Mode,
    cursor: Position,
    filename: Option<PathBuf>,
    status: StatusMessage,
    command_line: String,
    pub(crate) pending_trigger: Option<PendingTrigger>,
    page_rows: usize,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Create a session over an empty buffer.
    pub fn new() -> Self {
        let mut session = Self {
            buffer: TextBuffer::new(),
            log: OperationLog::new(),
            selection: SelectionState::default(),
            clipboard: Clipboard::new(),
            mode: Mode::Normal,
            cursor: Position::new(0, 0),
            filename: None,
            status: StatusMessage::new(),
            command_line: String::new(),
            pending_trigger: None,
            page_rows: 24,
        };
        session.set_status("HELP: cc = insert | Ctrl+Z = undo | Ctrl+Y = redo | Ctrl+A = select all");
        session
    }

    /// Create a session over `text`, one row per line, with clean state and
    /// empty history.
    pub fn with_text(text: &str) -> Self {
        let mut session = Self::new();
        session.buffer = TextBuffer::from_text(text);
        session.buffer.mark_clean();
        session
    }

    // --- read-only state for the front-end ---

    /// The line store.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Current mode tag.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Selection state, for rendering and membership queries.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The clipboard content.
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Path of the file being edited, if any.
    pub fn filename(&self) -> Option<&PathBuf> {
        self.filename.as_ref()
    }

    /// Whether unsaved modifications exist.
    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// The status-line message.
    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    /// The in-progress command-mode text (including the leading colon).
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Whether an operation is available to undo.
    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    /// Whether an operation is available to redo.
    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    /// Number of applied operations in the log.
    pub fn undo_depth(&self) -> usize {
        self.log.undo_depth()
    }

    /// Number of undone operations in the log.
    pub fn redo_depth(&self) -> usize {
        self.log.redo_depth()
    }

    /// Replace the status-line message.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status.text = text.into();
        self.status.since = Instant::now();
    }

    /// Set the page size (visible text rows) used by PageUp/PageDown.
    pub fn set_page_rows(&mut self, rows: usize) {
        self.page_rows = rows.max(1);
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub(crate) fn set_command_line(&mut self, text: String) {
        self.command_line = text;
    }

    pub(crate) fn command_line_mut(&mut self) -> &mut String {
        &mut self.command_line
    }

    pub(crate) fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    // --- logged primitives: one record each, redo invalidated ---

    fn logged_insert_char(&mut self, line: usize, column: usize, ch: char) {
        if let Some(row) = self.buffer.row_mut(line) {
            row.insert_char(column, ch);
            self.buffer.touch();
            self.log.record(Operation::InsertChar {
                at: Position::new(line, column),
                ch,
            });
        }
    }

    fn logged_delete_char(&mut self, line: usize, column: usize) -> Option<char> {
        let cursor = self.cursor;
        let ch = self.buffer.row_mut(line)?.remove_char(column)?;
        self.buffer.touch();
        self.log.record(Operation::DeleteChar {
            at: Position::new(line, column),
            ch,
            cursor,
        });
        Some(ch)
    }

    fn logged_insert_row(&mut self, at: usize, text: &str) -> bool {
        if self.buffer.insert_row(at, text) {
            self.log.record(Operation::InsertLine {
                line: at,
                text: text.to_string(),
            });
            true
        } else {
            self.set_status(format!("Row index {at} out of range"));
            false
        }
    }

    fn logged_delete_row(&mut self, at: usize) -> bool {
        match self.buffer.delete_row(at) {
            Some(row) => {
                self.log.record(Operation::DeleteLine {
                    line: at,
                    text: row.into_text(),
                });
                true
            }
            None => false,
        }
    }

    // --- edit engine operations ---

    /// Insert `ch` at the cursor and advance one column.
    pub fn insert_char(&mut self, ch: char) {
        if self.cursor.line == self.buffer.line_count() {
            // Transient past-end state: materialize the row first.
            self.logged_insert_row(self.cursor.line, "");
        }
        let Position { line, column } = self.cursor;
        self.logged_insert_char(line, column, ch);
        self.cursor.column += 1;
    }

    /// Split the current row at the cursor; the cursor moves to the start of
    /// the new row. On an empty buffer this creates a single empty row.
    pub fn insert_newline(&mut self) {
        if self.buffer.line_count() == 0 {
            self.logged_insert_row(0, "");
            self.cursor = Position::new(0, 0);
            return;
        }
        let Position { line, column } = self.cursor;
        let suffix = match self.buffer.row_mut(line) {
            Some(row) => row.split_off(column),
            None => return,
        };
        self.buffer.touch();
        self.buffer.insert_row(line + 1, &suffix);
        self.log.record(Operation::Newline {
            at: Position::new(line, column),
            suffix,
        });
        self.cursor = Position::new(line + 1, 0);
    }

    /// Backspace: delete the character before the cursor, or merge the
    /// current row into the one above when the cursor is at column zero.
    /// A no-op at the very start of the buffer.
    pub fn delete_char(&mut self) {
        let Position { line, column } = self.cursor;
        if line >= self.buffer.line_count() {
            return;
        }
        if column == 0 && line == 0 {
            return;
        }
        if column > 0 {
            if self.logged_delete_char(line, column - 1).is_some() {
                self.cursor.column -= 1;
            }
            return;
        }

        // Merge row `line` into `line - 1`. Decomposed into logged
        // primitives so a later undo restores both rows exactly.
        let tail = match self.buffer.row(line) {
            Some(row) => row.text().to_string(),
            None => return,
        };
        let target = line - 1;
        let join_column = self.buffer.row_len(target);
        let mut at = join_column;
        for ch in tail.chars() {
            self.logged_insert_char(target, at, ch);
            at += 1;
        }
        self.logged_delete_row(line);
        self.cursor = Position::new(target, join_column);
    }

    /// Delete the character under the cursor, without joining lines.
    pub fn delete_forward(&mut self) {
        let Position { line, column } = self.cursor;
        if column < self.buffer.row_len(line) {
            self.logged_delete_char(line, column);
        }
    }

    /// Delete the row at `at`, clamping the cursor afterwards.
    pub fn delete_row(&mut self, at: usize) {
        if self.logged_delete_row(at) {
            let count = self.buffer.line_count();
            if self.cursor.line >= count {
                self.cursor.line = count.saturating_sub(1);
            }
            self.clamp_column();
        }
    }

    // --- undo / redo ---

    /// Undo the most recent operation, applying its inverse directly to the
    /// buffer, and park the record on the redo stack.
    pub fn undo(&mut self) {
        let Some(mut op) = self.log.pop_undo() else {
            self.set_status("Nothing to undo");
            return;
        };
        match &mut op {
            Operation::InsertChar { at, .. } => {
                if let Some(row) = self.buffer.row_mut(at.line) {
                    row.remove_char(at.column);
                    self.buffer.touch();
                }
                self.cursor = *at;
            }
            Operation::DeleteChar { at, ch, cursor } => {
                if let Some(row) = self.buffer.row_mut(at.line) {
                    row.insert_char(at.column, *ch);
                    self.buffer.touch();
                }
                self.cursor = *cursor;
            }
            Operation::InsertLine { line, .. } => {
                self.buffer.delete_row(*line);
                self.cursor = Position::new(*line, 0);
                self.clamp_cursor_line_loose();
            }
            Operation::DeleteLine { line, text } => {
                self.buffer.insert_row(*line, text);
                self.cursor = Position::new(*line, 0);
            }
            Operation::Newline { at, suffix } => {
                // Merge the split rows back together. The merged-away text is
                // re-saved into the record: redo must re-split with whatever
                // is below the boundary now, and that content only exists
                // transiently here.
                if let Some(row) = self.buffer.delete_row(at.line + 1) {
                    let merged = row.into_text();
                    if let Some(prev) = self.buffer.row_mut(at.line) {
                        prev.append(&merged);
                    }
                    self.buffer.touch();
                    *suffix = merged;
                }
                self.cursor = *at;
            }
        }
        self.log.push_redo(op);
    }

    /// Redo the most recently undone operation, re-applying its forward
    /// effect directly to the buffer, and return the record to the undo
    /// stack.
    pub fn redo(&mut self) {
        let Some(op) = self.log.pop_redo() else {
            self.set_status("Nothing to redo");
            return;
        };
        match &op {
            Operation::InsertChar { at, ch } => {
                if let Some(row) = self.buffer.row_mut(at.line) {
                    row.insert_char(at.column, *ch);
                    self.buffer.touch();
                }
                self.cursor = Position::new(at.line, at.column + 1);
            }
            Operation::DeleteChar { at, .. } => {
                if let Some(row) = self.buffer.row_mut(at.line) {
                    row.remove_char(at.column);
                    self.buffer.touch();
                }
                self.cursor = *at;
            }
            Operation::InsertLine { line, text } => {
                self.buffer.insert_row(*line, text);
                self.cursor = Position::new(*line, 0);
            }
            Operation::DeleteLine { line, .. } => {
                self.buffer.delete_row(*line);
                self.cursor = Position::new(*line, 0);
                self.clamp_cursor_line_loose();
            }
            Operation::Newline { at, suffix } => {
                if let Some(row) = self.buffer.row_mut(at.line) {
                    row.truncate(at.column);
                    self.buffer.touch();
                }
                self.buffer.insert_row(at.line + 1, suffix);
                self.cursor = Position::new(at.line + 1, 0);
            }
        }
        self.log.push_undo(op);
    }

    // --- selection, clipboard ---

    /// Select the whole buffer and arm the selection.
    pub fn select_all(&mut self) {
        if self.buffer.line_count() == 0 {
            return;
        }
        self.selection.select_all(&self.buffer);
        self.set_status("Selected all text");
    }

    /// Copy the active selection into the clipboard, replacing any prior
    /// content. First and last covered rows are clipped to the selection
    /// bounds; interior rows are taken whole.
    pub fn copy_selection(&mut self) {
        let Some(sel) = self.selection.range() else {
            self.set_status("No selection to copy");
            return;
        };
        if sel.is_empty() {
            self.set_status("No selection to copy");
            return;
        }
        let sel = sel.normalized();
        let mut lines = Vec::new();
        for line in sel.start.line..=sel.end.line {
            let Some(row) = self.buffer.row(line) else {
                break;
            };
            let start = if line == sel.start.line {
                sel.start.column
            } else {
                0
            };
            let end = if line == sel.end.line {
                sel.end.column
            } else {
                row.char_len()
            };
            lines.push(row.substring(start, end));
        }
        let count = lines.len();
        self.clipboard.replace(lines);
        self.set_status(format!("Copied {count} lines"));
    }

    /// Paste the clipboard at the cursor by re-invoking the character-insert
    /// and newline operations, so pasting is indistinguishable from typing
    /// for undo purposes.
    pub fn paste(&mut self) {
        if self.clipboard.is_empty() {
            self.set_status("Nothing to paste");
            return;
        }
        let lines: Vec<String> = self.clipboard.lines().to_vec();
        let count = lines.len();
        for (index, line) in lines.iter().enumerate() {
            for ch in line.chars() {
                self.insert_char(ch);
            }
            if index + 1 < count {
                self.insert_newline();
            }
        }
        self.set_status(format!("Pasted {count} lines"));
    }

    /// Delete the active selection, leaving the cursor at its start.
    /// The doomed text is copied to the clipboard first, and the deletion is
    /// decomposed into logged primitives so it can be undone step by step.
    pub fn delete_selection(&mut self) {
        let Some(sel) = self.selection.range() else {
            return;
        };
        if sel.is_empty() {
            self.selection.clear();
            return;
        }
        self.copy_selection();
        let sel = sel.normalized();

        if sel.start.line == sel.end.line {
            let line = sel.start.line;
            let end = sel.end.column.min(self.buffer.row_len(line));
            for _ in sel.start.column..end {
                self.logged_delete_char(line, sel.start.column);
            }
        } else {
            let end_line = sel.end.line.min(self.buffer.line_count().saturating_sub(1));
            // Remainder of the last covered row, past the selection end.
            let tail = match self.buffer.row(end_line) {
                Some(row) => row.substring(sel.end.column, row.char_len()),
                None => String::new(),
            };
            // Truncate the first row at the selection start.
            let first_len = self.buffer.row_len(sel.start.line);
            for _ in sel.start.column..first_len {
                self.logged_delete_char(sel.start.line, sel.start.column);
            }
            // Drop the interior rows and the last row, bottom up.
            for line in (sel.start.line + 1..=end_line).rev() {
                self.logged_delete_row(line);
            }
            // Append the remainder to the first row.
            let mut at = sel.start.column;
            for ch in tail.chars() {
                self.logged_insert_char(sel.start.line, at, ch);
                at += 1;
            }
        }

        self.cursor = sel.start;
        self.clamp_column();
        self.selection.clear();
    }

    // --- cursor movement ---

    /// Apply one cursor movement, clamping to buffer bounds.
    pub fn move_cursor(&mut self, mv: CursorMove) {
        let count = self.buffer.line_count();
        match mv {
            CursorMove::Left => {
                if self.cursor.column > 0 {
                    self.cursor.column -= 1;
                } else if self.cursor.line > 0 {
                    self.cursor.line -= 1;
                    self.cursor.column = self.buffer.row_len(self.cursor.line);
                }
            }
            CursorMove::Right => {
                let len = self.buffer.row_len(self.cursor.line);
                if self.cursor.line < count && self.cursor.column < len {
                    self.cursor.column += 1;
                } else if self.cursor.column >= len && self.cursor.line + 1 < count {
                    self.cursor.line += 1;
                    self.cursor.column = 0;
                }
            }
            CursorMove::Up => {
                if self.cursor.line > 0 {
                    self.cursor.line -= 1;
                    self.clamp_column();
                }
            }
            CursorMove::Down => {
                if self.cursor.line + 1 < count {
                    self.cursor.line += 1;
                    self.clamp_column();
                }
            }
            CursorMove::LineStart => {
                self.cursor.column = 0;
            }
            CursorMove::LineEnd => {
                self.cursor.column = self.buffer.row_len(self.cursor.line);
            }
            CursorMove::PageUp => {
                self.cursor.line = self.cursor.line.saturating_sub(self.page_rows);
                self.clamp_column();
            }
            CursorMove::PageDown => {
                if count > 0 {
                    self.cursor.line = (self.cursor.line + self.page_rows).min(count - 1);
                }
                self.clamp_column();
            }
        }
    }

    fn clamp_column(&mut self) {
        let len = self.buffer.row_len(self.cursor.line);
        if self.cursor.column > len {
            self.cursor.column = len;
        }
    }

    /// Keep the cursor row within `0..=line_count` (the transient past-end
    /// position is valid immediately before a row is appended).
    fn clamp_cursor_line_loose(&mut self) {
        let count = self.buffer.line_count();
        if self.cursor.line > count {
            self.cursor.line = count;
        }
    }

    // --- file I/O ---

    /// Load `path` into the buffer, replacing all content and clearing both
    /// history stacks (loaded history cannot apply to different content).
    /// A missing file is not an error: it yields an empty buffer, to be
    /// created on save. Other read failures also leave an empty buffer but
    /// are reported to the caller.
    pub fn open_file(&mut self, path: impl Into<PathBuf>) -> io::Result<()> {
        let path = path.into();
        let (text, error) = match fs::read_to_string(&path) {
            Ok(text) => (text, None),
            Err(err) if err.kind() == io::ErrorKind::NotFound => (String::new(), None),
            Err(err) => (String::new(), Some(err)),
        };
        self.buffer = TextBuffer::from_text(&text);
        self.buffer.mark_clean();
        self.log.clear();
        self.selection.clear();
        self.cursor = Position::new(0, 0);
        self.filename = Some(path);
        match error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Write the buffer to its file, newline-terminating every row.
    /// Failures are reported through the status message; editing continues.
    /// Returns whether the write succeeded.
    pub fn save(&mut self) -> bool {
        let Some(path) = self.filename.clone() else {
            self.set_status("Error: No filename");
            return false;
        };
        match fs::write(&path, self.buffer.to_text()) {
            Ok(()) => {
                self.buffer.mark_clean();
                self.set_status(format!(
                    "{} lines written to {}",
                    self.buffer.line_count(),
                    path.display()
                ));
                true
            }
            Err(err) => {
                self.set_status(format!("Can't save! I/O error: {err}"));
                false
            }
        }
    }

    /// Dispatch a buffered ex command. Returns `true` when the command asks
    /// the editor to quit.
    pub(crate) fn dispatch_command(&mut self, raw: &str) -> bool {
        let Some(command) = parse_command(raw) else {
            return false;
        };
        match command {
            ExCommand::Quit => {
                if self.buffer.is_dirty() {
                    self.set_status("No write since last change (add ! to override)");
                } else {
                    return true;
                }
            }
            ExCommand::ForceQuit => return true,
            ExCommand::Write => {
                self.save();
            }
            ExCommand::WriteQuit => {
                if self.save() {
                    return true;
                }
            }
            ExCommand::Edit { path, force } => {
                if !force && self.buffer.is_dirty() {
                    self.set_status("No write since last change (add ! to override)");
                } else {
                    match self.open_file(path.clone()) {
                        Ok(()) => self.set_status(format!("Opened {path}")),
                        Err(err) => {
                            self.set_status(format!("Can't open {path}: {err} (new file)"))
                        }
                    }
                }
            }
            ExCommand::Unknown(text) => {
                self.set_status(format!("Unknown command: {text}"));
            }
        }
        false
    }
}
