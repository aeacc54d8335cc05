//! Undo/redo integration tests driven through the edit engine.

use zedit_core::{CursorMove, EditSession, Position};

fn type_text(session: &mut EditSession, text: &str) {
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            session.insert_newline();
        }
        for ch in line.chars() {
            session.insert_char(ch);
        }
    }
}

#[test]
fn test_insert_undo_redo_round_trip() {
    let mut session = EditSession::new();
    type_text(&mut session, "abc");
    assert_eq!(session.buffer().to_text(), "abc\n");
    // One record per character plus one for the materialized first row.
    assert_eq!(session.undo_depth(), 4);

    for _ in 0..4 {
        session.undo();
    }
    assert_eq!(session.buffer().line_count(), 0);
    assert!(!session.can_undo());
    assert_eq!(session.redo_depth(), 4);

    for _ in 0..4 {
        session.redo();
    }
    assert_eq!(session.buffer().to_text(), "abc\n");
    assert_eq!(session.cursor(), Position::new(0, 3));
    assert!(!session.can_redo());
}

#[test]
fn test_undo_on_empty_log_reports() {
    let mut session = EditSession::new();
    session.undo();
    assert_eq!(session.status().text(), "Nothing to undo");
    session.redo();
    assert_eq!(session.status().text(), "Nothing to redo");
}

#[test]
fn test_fresh_edit_clears_redo() {
    let mut session = EditSession::new();
    type_text(&mut session, "ab");
    session.undo();
    assert!(session.can_redo());

    session.insert_char('c');
    assert!(!session.can_redo());
    assert_eq!(session.buffer().to_text(), "ac\n");
}

#[test]
fn test_newline_split_restores_cursor_on_undo() {
    let mut session = EditSession::new();
    type_text(&mut session, "hello\nworld");

    // Back to the end of the first line, then split there.
    session.move_cursor(CursorMove::Up);
    session.move_cursor(CursorMove::LineEnd);
    assert_eq!(session.cursor(), Position::new(0, 5));

    session.insert_newline();
    assert_eq!(session.buffer().to_text(), "hello\n\nworld\n");
    assert_eq!(session.cursor(), Position::new(1, 0));

    session.undo();
    assert_eq!(session.buffer().to_text(), "hello\nworld\n");
    assert_eq!(session.cursor(), Position::new(0, 5));

    session.redo();
    assert_eq!(session.buffer().to_text(), "hello\n\nworld\n");
    assert_eq!(session.cursor(), Position::new(1, 0));
}

#[test]
fn test_mid_line_split_moves_suffix() {
    let mut session = EditSession::new();
    type_text(&mut session, "hello");
    session.move_cursor(CursorMove::LineStart);
    session.move_cursor(CursorMove::Right);
    session.move_cursor(CursorMove::Right);

    session.insert_newline();
    assert_eq!(session.buffer().row(0).unwrap().text(), "he");
    assert_eq!(session.buffer().row(1).unwrap().text(), "llo");

    session.undo();
    assert_eq!(session.buffer().to_text(), "hello\n");
    assert_eq!(session.cursor(), Position::new(0, 2));
}

#[test]
fn test_backspace_merge_round_trips() {
    let mut session = EditSession::new();
    type_text(&mut session, "ab\ncd");
    let depth_before = session.undo_depth();

    session.move_cursor(CursorMove::LineStart);
    session.delete_char();
    assert_eq!(session.buffer().to_text(), "abcd\n");
    assert_eq!(session.cursor(), Position::new(0, 2));
    // The merge decomposes into two character inserts plus a row delete.
    assert_eq!(session.undo_depth(), depth_before + 3);

    for _ in 0..3 {
        session.undo();
    }
    assert_eq!(session.buffer().to_text(), "ab\ncd\n");

    for _ in 0..3 {
        session.redo();
    }
    assert_eq!(session.buffer().to_text(), "abcd\n");
}

#[test]
fn test_delete_forward_is_one_record() {
    let mut session = EditSession::new();
    type_text(&mut session, "abc");
    session.move_cursor(CursorMove::LineStart);
    let depth = session.undo_depth();

    session.delete_forward();
    assert_eq!(session.buffer().to_text(), "bc\n");
    assert_eq!(session.undo_depth(), depth + 1);

    session.undo();
    assert_eq!(session.buffer().to_text(), "abc\n");
}

#[test]
fn test_delete_forward_undo_restores_cursor() {
    let mut session = EditSession::new();
    type_text(&mut session, "abc");
    session.move_cursor(CursorMove::LineStart);

    session.delete_forward();
    assert_eq!(session.buffer().to_text(), "bc\n");
    assert_eq!(session.cursor(), Position::new(0, 0));

    session.undo();
    assert_eq!(session.buffer().to_text(), "abc\n");
    // The delete happened under the cursor, so undo puts it back there.
    assert_eq!(session.cursor(), Position::new(0, 0));

    session.redo();
    assert_eq!(session.buffer().to_text(), "bc\n");
    assert_eq!(session.cursor(), Position::new(0, 0));
}

#[test]
fn test_backspace_undo_restores_cursor() {
    let mut session = EditSession::new();
    type_text(&mut session, "abc");
    assert_eq!(session.cursor(), Position::new(0, 3));

    session.delete_char();
    assert_eq!(session.cursor(), Position::new(0, 2));

    session.undo();
    assert_eq!(session.buffer().to_text(), "abc\n");
    // Backspace deleted behind the cursor; undo returns to where it was.
    assert_eq!(session.cursor(), Position::new(0, 3));
}

#[test]
fn test_newline_on_empty_buffer() {
    let mut session = EditSession::new();
    session.insert_newline();
    assert_eq!(session.buffer().line_count(), 1);
    assert_eq!(session.buffer().row(0).unwrap().text(), "");
    assert_eq!(session.cursor(), Position::new(0, 0));
    assert_eq!(session.undo_depth(), 1);

    session.undo();
    assert_eq!(session.buffer().line_count(), 0);
}

#[test]
fn test_every_keystroke_is_one_undo_step() {
    let mut session = EditSession::new();
    session.insert_char('h');
    // Row materialization plus the character.
    assert_eq!(session.undo_depth(), 2);
    session.insert_char('i');
    assert_eq!(session.undo_depth(), 3);
    session.delete_char();
    assert_eq!(session.undo_depth(), 4);
    assert_eq!(session.buffer().to_text(), "h\n");
}

#[test]
fn test_full_history_replay() {
    let mut session = EditSession::new();
    type_text(&mut session, "hello\nworld");
    let total = session.undo_depth();

    while session.can_undo() {
        session.undo();
    }
    assert_eq!(session.buffer().line_count(), 0);

    while session.can_redo() {
        session.redo();
    }
    assert_eq!(session.buffer().to_text(), "hello\nworld\n");
    assert_eq!(session.undo_depth(), total);
}
