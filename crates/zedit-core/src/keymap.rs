//! The mode state machine and key dispatch.
//!
//! Input arrives as [`EditorKey`] values, already decoded from whatever
//! terminal backend the front-end uses; this module maps them to session
//! operations according to the current [`Mode`]. Timing-sensitive behavior
//! (the two-keystroke insert trigger) takes the current instant as an
//! argument so tests can drive the clock.

use crate::session::{CursorMove, EditSession};
use std::mem;
use std::time::{Duration, Instant};

/// How long the second keystroke of the `c c` insert trigger may lag the
/// first before the pending state expires.
pub const TRIGGER_WINDOW: Duration = Duration::from_millis(500);

/// The four editor modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation and command triggers; typing does not edit.
    Normal,
    /// Keystrokes insert text.
    Insert,
    /// An ex command is being accumulated on the message line.
    Command,
    /// A selection is armed and extends with the cursor.
    Selection,
}

impl Mode {
    /// Short uppercase tag for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
            Mode::Selection => "SELECT",
        }
    }
}

/// A decoded keystroke, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// A printable character (or tab).
    Char(char),
    /// A control chord, carrying the lowercase letter.
    Ctrl(char),
    /// Enter / Return.
    Enter,
    /// Escape.
    Esc,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Cursor left.
    Left,
    /// Cursor right.
    Right,
    /// Cursor up.
    Up,
    /// Cursor down.
    Down,
    /// Start of line.
    Home,
    /// End of line.
    End,
    /// Up one page.
    PageUp,
    /// Down one page.
    PageDown,
}

/// First half of the `c c` insert trigger has been seen.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingTrigger {
    pub(crate) deadline: Instant,
}

/// What the front-end should do after a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Keep running.
    Continue,
    /// Tear down the terminal and exit.
    Quit,
}

impl EditSession {
    /// Process one keystroke in the current mode.
    ///
    /// `now` is compared against the pending-trigger deadline; pass
    /// [`Instant::now`] in production.
    pub fn process_key(&mut self, key: EditorKey, now: Instant) -> KeyOutcome {
        // Resolve a pending insert trigger first. A matching second 'c'
        // within the window is consumed; anything else (including a late
        // 'c') falls through and is handled as a fresh keystroke.
        if let Some(pending) = self.pending_trigger.take()
            && self.mode() == Mode::Normal
            && now <= pending.deadline
            && key == EditorKey::Char('c')
        {
            self.enter_insert_mode();
            return KeyOutcome::Continue;
        }

        // Quit is honored in every mode, including command mode.
        if key == EditorKey::Ctrl('q') {
            if self.is_dirty() {
                self.set_status("No write since last change (add ! to override)");
                return KeyOutcome::Continue;
            }
            return KeyOutcome::Quit;
        }

        if self.mode() == Mode::Command {
            return self.command_mode_key(key);
        }

        // The remaining control chords work the same in normal, insert, and
        // selection modes.
        match key {
            EditorKey::Ctrl('z') => {
                self.undo();
                return KeyOutcome::Continue;
            }
            EditorKey::Ctrl('y') => {
                self.redo();
                return KeyOutcome::Continue;
            }
            EditorKey::Ctrl('v') => {
                self.paste();
                return KeyOutcome::Continue;
            }
            EditorKey::Ctrl('k') => {
                let had_selection = self
                    .selection()
                    .range()
                    .is_some_and(|sel| !sel.is_empty());
                self.copy_selection();
                if had_selection {
                    self.selection_mut().clear();
                    if self.mode() == Mode::Selection {
                        self.set_mode(Mode::Normal);
                    }
                }
                return KeyOutcome::Continue;
            }
            EditorKey::Ctrl('h') => {
                self.set_status(
                    "cc = insert | v = select | : = command | Ctrl+K/V = copy/paste | Ctrl+Z/Y = undo/redo | Ctrl+Q = quit",
                );
                return KeyOutcome::Continue;
            }
            _ => {}
        }

        match self.mode() {
            Mode::Normal => self.normal_mode_key(key, now),
            Mode::Insert => self.insert_mode_key(key),
            Mode::Selection => self.selection_mode_key(key),
            Mode::Command => unreachable!("command mode handled above"),
        }
        KeyOutcome::Continue
    }

    fn normal_mode_key(&mut self, key: EditorKey, now: Instant) {
        match key {
            EditorKey::Char('c') => {
                self.pending_trigger = Some(PendingTrigger {
                    deadline: now + TRIGGER_WINDOW,
                });
            }
            EditorKey::Char(':') => {
                self.set_mode(Mode::Command);
                self.set_command_line(":".to_string());
            }
            EditorKey::Char('v') => {
                let cursor = self.cursor();
                self.selection_mut().start_at(cursor);
                self.set_mode(Mode::Selection);
                self.set_status("-- VISUAL --");
            }
            EditorKey::Char('x') | EditorKey::Delete => self.delete_forward(),
            EditorKey::Ctrl('a') => {
                self.select_all();
                if self.selection().range().is_some() {
                    self.set_mode(Mode::Selection);
                }
            }
            EditorKey::Enter => self.enter_insert_mode(),
            _ => {
                if let Some(mv) = normal_move(key) {
                    self.move_cursor(mv);
                }
            }
        }
    }

    fn insert_mode_key(&mut self, key: EditorKey) {
        match key {
            EditorKey::Esc | EditorKey::Ctrl('c') => self.leave_insert_mode(),
            EditorKey::Backspace => self.delete_char(),
            EditorKey::Delete => self.delete_forward(),
            EditorKey::Enter => self.insert_newline(),
            EditorKey::Char(c) if c == '\t' || !c.is_control() => self.insert_char(c),
            _ => {
                if let Some(mv) = arrow_move(key) {
                    self.move_cursor(mv);
                }
            }
        }
    }

    fn selection_mode_key(&mut self, key: EditorKey) {
        match key {
            EditorKey::Esc => {
                self.selection_mut().clear();
                self.set_mode(Mode::Normal);
                self.set_status("-- NORMAL --");
            }
            EditorKey::Char('y') => {
                self.copy_selection();
                self.selection_mut().clear();
                self.set_mode(Mode::Normal);
            }
            EditorKey::Char('d') => {
                self.delete_selection();
                self.set_mode(Mode::Normal);
            }
            _ => {
                if let Some(mv) = normal_move(key) {
                    self.move_cursor(mv);
                    let cursor = self.cursor();
                    self.selection_mut().update(cursor);
                }
            }
        }
    }

    fn command_mode_key(&mut self, key: EditorKey) -> KeyOutcome {
        match key {
            EditorKey::Esc => {
                self.set_command_line(String::new());
                self.set_mode(Mode::Normal);
            }
            EditorKey::Enter => {
                let raw = mem::take(self.command_line_mut());
                self.set_mode(Mode::Normal);
                if self.dispatch_command(&raw) {
                    return KeyOutcome::Quit;
                }
            }
            EditorKey::Backspace => {
                self.command_line_mut().pop();
                if self.command_line().is_empty() {
                    self.set_mode(Mode::Normal);
                }
            }
            EditorKey::Char(c) if !c.is_control() => {
                // A doubled colon at the prompt collapses to one.
                if !(c == ':' && self.command_line() == ":") {
                    self.command_line_mut().push(c);
                }
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn enter_insert_mode(&mut self) {
        self.selection_mut().clear();
        self.set_mode(Mode::Insert);
        self.set_status("-- INSERT --");
    }

    fn leave_insert_mode(&mut self) {
        if self.cursor().column > 0 && self.buffer().line_count() > 0 {
            self.move_cursor(CursorMove::Left);
        }
        self.set_mode(Mode::Normal);
        self.set_status("-- NORMAL --");
    }
}

/// Movement available in every mode (arrows and paging).
fn arrow_move(key: EditorKey) -> Option<CursorMove> {
    match key {
        EditorKey::Left => Some(CursorMove::Left),
        EditorKey::Right => Some(CursorMove::Right),
        EditorKey::Up => Some(CursorMove::Up),
        EditorKey::Down => Some(CursorMove::Down),
        EditorKey::Home => Some(CursorMove::LineStart),
        EditorKey::End => Some(CursorMove::LineEnd),
        EditorKey::PageUp => Some(CursorMove::PageUp),
        EditorKey::PageDown => Some(CursorMove::PageDown),
        _ => None,
    }
}

/// Movement in normal and selection modes: arrows plus the vi letters.
fn normal_move(key: EditorKey) -> Option<CursorMove> {
    match key {
        EditorKey::Char('h') => Some(CursorMove::Left),
        EditorKey::Char('l') => Some(CursorMove::Right),
        EditorKey::Char('k') => Some(CursorMove::Up),
        EditorKey::Char('j') => Some(CursorMove::Down),
        EditorKey::Char('0') => Some(CursorMove::LineStart),
        EditorKey::Char('$') => Some(CursorMove::LineEnd),
        _ => arrow_move(key),
    }
}
