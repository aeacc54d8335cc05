#![warn(missing_docs)]
//! Zedit Core - Modal Terminal Editor Kernel
//!
//! # Overview
//!
//! `zedit-core` is the headless kernel of a modal, vi-flavored terminal text
//! editor. It owns the document (a flat array of line rows), the cursor and
//! selection, the clipboard, the undo/redo operation log, and the mode state
//! machine. It performs no rendering and reads no terminal input: the
//! front-end decodes keystrokes into [`EditorKey`] values, feeds them to
//! [`EditSession::process_key`], and draws whatever state it reads back.
//!
//! # Core Features
//!
//! - **Line-array storage**: each line is an independently owned row,
//!   char-addressed, with byte offsets resolved at the row boundary
//! - **Linear undo/redo**: every primitive edit appends exactly one
//!   reversible record; a fresh edit invalidates the redo stack
//! - **Modal input**: normal / insert / command / selection modes, with a
//!   timed two-keystroke insert trigger (`c c`)
//! - **Selection and clipboard**: anchored ranges with half-open
//!   containment, line-wise copy, paste replayed through the ordinary
//!   insert path so it undoes like typing
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Instant;
//! use zedit_core::{EditSession, EditorKey, Mode};
//!
//! let mut session = EditSession::new();
//! let now = Instant::now();
//!
//! // Two quick presses of 'c' enter insert mode.
//! session.process_key(EditorKey::Char('c'), now);
//! session.process_key(EditorKey::Char('c'), now);
//! assert_eq!(session.mode(), Mode::Insert);
//!
//! for ch in "hello".chars() {
//!     session.process_key(EditorKey::Char(ch), now);
//! }
//! assert_eq!(session.buffer().to_text(), "hello\n");
//!
//! // Each keystroke is one undo step.
//! session.undo();
//! assert_eq!(session.buffer().to_text(), "hell\n");
//! ```
//!
//! # Module Description
//!
//! - [`row`] - a single line of text, char-addressed
//! - [`buffer`] - the line store and dirty counter
//! - [`selection`] - positions, ranges, and the armed selection state
//! - [`clipboard`] - the owned line-wise clipboard
//! - [`history`] - reversible operation records and the undo/redo stacks
//! - [`command`] - ex-style command parsing (`:w`, `:q`, ...)
//! - [`session`] - the edit engine tying the pieces together
//! - [`keymap`] - modes and keystroke dispatch

pub mod buffer;
pub mod clipboard;
pub mod command;
pub mod history;
pub mod keymap;
pub mod row;
pub mod selection;
pub mod session;

pub use buffer::TextBuffer;
pub use clipboard::Clipboard;
pub use command::{ExCommand, parse_command};
pub use history::{Operation, OperationLog};
pub use keymap::{EditorKey, KeyOutcome, Mode, TRIGGER_WINDOW};
pub use row::{Row, TAB_STOP};
pub use selection::{Position, Selection, SelectionState};
pub use session::{CursorMove, EditSession, StatusMessage};
