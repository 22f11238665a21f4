//! Line editor tests.

use dandy_editor::{EditorEvent, Key, KeyAction, Keymap, LineEditor, MemoryScreen};
use proptest::prelude::*;

fn press(editor: &mut LineEditor, keymap: &Keymap, keys: &[Key]) -> Vec<EditorEvent> {
    keys.iter().map(|k| editor.handle_key(k, keymap)).collect()
}

fn chars(text: &str) -> Vec<Key> {
    text.chars().map(Key::Char).collect()
}

#[test]
fn edit_in_the_middle() {
    let keymap = Keymap::default();
    let mut editor = LineEditor::new();
    press(&mut editor, &keymap, &chars("rol 1d6"));
    press(&mut editor, &keymap, &[Key::Home, Key::Right, Key::Right, Key::Right]);
    press(&mut editor, &keymap, &chars("l"));
    assert_eq!(editor.text(), "roll 1d6");
    press(&mut editor, &keymap, &[Key::End, Key::Backspace, Key::Backspace]);
    assert_eq!(editor.text(), "roll 1");
    press(&mut editor, &keymap, &[Key::Ctrl('a'), Key::Delete]);
    assert_eq!(editor.text(), "oll 1");
}

#[test]
fn history_round_trip() {
    let keymap = Keymap::default();
    let mut editor = LineEditor::new();
    for line in ["roll 1d4", "roll 1d6", "roll 1d4"] {
        press(&mut editor, &keymap, &chars(line));
        press(&mut editor, &keymap, &[Key::Enter]);
    }
    assert_eq!(editor.history().len(), 2);
    press(&mut editor, &keymap, &[Key::Up]);
    assert_eq!(editor.text(), "roll 1d4");
    press(&mut editor, &keymap, &[Key::Up]);
    assert_eq!(editor.text(), "roll 1d6");
    press(&mut editor, &keymap, &[Key::Up]);
    assert_eq!(editor.text(), "");
    press(&mut editor, &keymap, &[Key::Up]);
    assert_eq!(editor.text(), "roll 1d4");
}

#[test]
fn control_keys_never_insert() {
    let keymap = Keymap::empty();
    let mut editor = LineEditor::new();
    let events = press(
        &mut editor,
        &keymap,
        &[Key::Enter, Key::Up, Key::Ctrl('x'), Key::Char('\u{1b}'), Key::Char('\t')],
    );
    assert!(events.iter().all(|e| matches!(e, EditorEvent::Unrecognized(_))));
    assert_eq!(editor.text(), "");
}

#[test]
fn render_follows_the_caret() {
    let keymap = Keymap::default();
    let mut screen = MemoryScreen::new(12, 2);
    let mut editor = LineEditor::new();
    press(&mut editor, &keymap, &chars("echo a long line"));
    editor.render(&mut screen, 1, " > ").unwrap();
    let (row, col) = screen.cursor();
    assert_eq!(row, 1);
    assert!(col < 12);
    assert!(screen.row_text(1).ends_with("line"));

    press(&mut editor, &keymap, &[Key::Home]);
    editor.render(&mut screen, 1, " > ").unwrap();
    assert_eq!(screen.row_text(1), " > echo a lo");
    assert_eq!(screen.cursor(), (1, 3));
}

proptest! {
    #[test]
    fn random_keys_keep_cursor_in_bounds(
        keys in prop::collection::vec(
            prop_oneof![
                Just(Key::Left),
                Just(Key::Right),
                Just(Key::Home),
                Just(Key::End),
                Just(Key::Backspace),
                Just(Key::Delete),
                Just(Key::Up),
                Just(Key::Down),
                Just(Key::Enter),
                Just(Key::Tab),
                "[a-z ]".prop_map(|s| Key::Char(s.chars().next().unwrap_or('x'))),
            ],
            0..100,
        )
    ) {
        let keymap = Keymap::default();
        let mut editor = LineEditor::new();
        editor.set_commands(["roll", "echo", "exec"]);
        for key in &keys {
            editor.handle_key(key, &keymap);
            prop_assert!(editor.cursor().position() <= editor.text().chars().count());
        }
    }

    #[test]
    fn set_position_clamps(len in 0usize..50, requested in any::<isize>()) {
        let mut cursor = dandy_editor::Cursor::new();
        let pos = cursor.set_position(requested, len);
        prop_assert!(pos <= len);
        if requested < 0 {
            prop_assert_eq!(pos, 0);
        }
    }
}

#[test]
fn actions_apply_directly() {
    let mut editor = LineEditor::new();
    editor.insert_str("abc");
    assert_eq!(editor.apply(KeyAction::MoveToStart), EditorEvent::Changed);
    assert_eq!(editor.cursor().position(), 0);
    assert_eq!(editor.apply(KeyAction::Halt), EditorEvent::Halt);
}
