//! Selection and clipboard behavior through the key dispatch layer.

use std::time::Instant;
use zedit_core::{EditSession, EditorKey, Mode, Position};

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

fn press(session: &mut EditSession, keys: &[EditorKey]) {
    let now = Instant::now();
    for &key in keys {
        session.process_key(key, now);
    }
}

#[test]
fn test_select_all_copy_paste() {
    let mut session = EditSession::new();
    type_text(&mut session, "ab\ncd");

    press(&mut session, &[EditorKey::Ctrl('a')]);
    assert_eq!(session.mode(), Mode::Selection);
    let range = session.selection().range().unwrap();
    assert_eq!(range.start, Position::new(0, 0));
    assert_eq!(range.end, Position::new(1, 2));

    press(&mut session, &[EditorKey::Ctrl('k')]);
    assert_eq!(session.status().text(), "Copied 2 lines");
    assert_eq!(session.mode(), Mode::Normal);
    assert!(session.selection().range().is_none());
    assert_eq!(session.clipboard().lines(), ["ab", "cd"]);

    // Paste at the end of the last line duplicates the document inline.
    assert_eq!(session.cursor(), Position::new(1, 2));
    press(&mut session, &[EditorKey::Ctrl('v')]);
    assert_eq!(session.buffer().to_text(), "ab\ncdab\ncd\n");
    assert_eq!(session.status().text(), "Pasted 2 lines");
}

#[test]
fn test_visual_copy_clips_to_range() {
    let mut session = EditSession::new();
    type_text(&mut session, "hello");

    press(
        &mut session,
        &[
            EditorKey::Home,
            EditorKey::Char('v'),
            EditorKey::Char('l'),
            EditorKey::Char('l'),
            EditorKey::Char('l'),
            EditorKey::Char('y'),
        ],
    );
    assert_eq!(session.clipboard().lines(), ["hel"]);
    assert_eq!(session.mode(), Mode::Normal);
    assert_eq!(session.status().text(), "Copied 1 lines");
}

#[test]
fn test_copy_spanning_rows_takes_interior_whole() {
    let mut session = EditSession::new();
    type_text(&mut session, "alpha\nbravo\ncharlie");

    // Anchor at (0,2), extend to (2,3).
    press(
        &mut session,
        &[
            EditorKey::PageUp,
            EditorKey::Home,
            EditorKey::Char('l'),
            EditorKey::Char('l'),
            EditorKey::Char('v'),
            EditorKey::Char('j'),
            EditorKey::Char('j'),
            EditorKey::Char('l'),
            EditorKey::Char('y'),
        ],
    );
    assert_eq!(session.clipboard().lines(), ["pha", "bravo", "cha"]);
}

#[test]
fn test_copy_without_selection_reports() {
    let mut session = EditSession::new();
    type_text(&mut session, "text");
    press(&mut session, &[EditorKey::Ctrl('k')]);
    assert_eq!(session.status().text(), "No selection to copy");
    assert!(session.clipboard().is_empty());
}

#[test]
fn test_delete_selection_multirow_and_undo() {
    let mut session = EditSession::new();
    type_text(&mut session, "one\ntwo\nthree");
    let depth_before = session.undo_depth();

    // Select (0,1) through (2,1) and delete it.
    press(
        &mut session,
        &[
            EditorKey::PageUp,
            EditorKey::Home,
            EditorKey::Char('l'),
            EditorKey::Char('v'),
            EditorKey::Char('j'),
            EditorKey::Char('j'),
            EditorKey::Char('d'),
        ],
    );
    assert_eq!(session.buffer().to_text(), "ohree\n");
    assert_eq!(session.cursor(), Position::new(0, 1));
    assert_eq!(session.mode(), Mode::Normal);
    // Doomed text lands on the clipboard before removal.
    assert_eq!(session.clipboard().lines(), ["ne", "two", "t"]);

    // The deletion decomposed into primitives: undo them all to restore.
    while session.undo_depth() > depth_before {
        session.undo();
    }
    assert_eq!(session.buffer().to_text(), "one\ntwo\nthree\n");
}

#[test]
fn test_delete_selection_single_row() {
    let mut session = EditSession::new();
    type_text(&mut session, "abcdef");
    press(
        &mut session,
        &[
            EditorKey::Home,
            EditorKey::Char('l'),
            EditorKey::Char('v'),
            EditorKey::Char('l'),
            EditorKey::Char('l'),
            EditorKey::Char('l'),
            EditorKey::Char('d'),
        ],
    );
    // Half-open: columns 1..4 removed.
    assert_eq!(session.buffer().to_text(), "aef\n");
    assert_eq!(session.clipboard().lines(), ["bcd"]);
}

#[test]
fn test_paste_undoes_like_typing() {
    let mut session = EditSession::new();
    type_text(&mut session, "hel");
    press(&mut session, &[EditorKey::Ctrl('a'), EditorKey::Ctrl('k')]);
    let depth = session.undo_depth();

    press(&mut session, &[EditorKey::End, EditorKey::Ctrl('v')]);
    assert_eq!(session.buffer().to_text(), "helhel\n");
    // Three characters pasted, three records appended.
    assert_eq!(session.undo_depth(), depth + 3);

    session.undo();
    assert_eq!(session.buffer().to_text(), "helhe\n");
}

#[test]
fn test_paste_empty_clipboard_reports() {
    let mut session = EditSession::new();
    press(&mut session, &[EditorKey::Ctrl('v')]);
    assert_eq!(session.status().text(), "Nothing to paste");
}

#[test]
fn test_clipboard_survives_source_deletion() {
    let mut session = EditSession::new();
    type_text(&mut session, "keep");
    press(&mut session, &[EditorKey::Ctrl('a'), EditorKey::Ctrl('k')]);

    // Destroy the source row; the clipboard owns its own copy.
    session.delete_row(0);
    assert_eq!(session.buffer().line_count(), 0);
    assert_eq!(session.clipboard().lines(), ["keep"]);
}
