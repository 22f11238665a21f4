//! Interactive session tests, driven by scripted keys on an in-memory
//! screen.

use std::fs;

use dandy_dice::Roller;
use dandy_editor::{InputEvent, Key, Keymap, MemoryScreen, ScriptedInput};
use dandy_runtime::{CommandInterpreter, Session, ShellConfig};
use tempfile::TempDir;

fn session(width: u16, height: u16) -> Session {
    let interpreter = CommandInterpreter::new().with_roller(Roller::seeded(4));
    Session::new(interpreter, Keymap::default(), width, height)
}

#[test]
fn typed_commands_echo_and_print() {
    let mut screen = MemoryScreen::new(30, 5);
    let mut input = ScriptedInput::new().line("echo hello").line("roll 1d1+2");
    let mut session = session(30, 5);
    session.run(&mut input, &mut screen).unwrap();

    assert_eq!(
        screen.lines(),
        vec![" > echo hello", "hello", " > roll 1d1+2", "3 | [1] + 2", " >"]
    );
    assert_eq!(screen.cursor(), (4, 3));
    assert!(session.is_running());
}

#[test]
fn errors_are_drawn_and_the_loop_continues() {
    let mut screen = MemoryScreen::new(30, 5);
    let mut input = ScriptedInput::new().line("zap").line("echo still here");
    let mut session = session(30, 5);
    session.run(&mut input, &mut screen).unwrap();

    let lines = screen.lines();
    assert_eq!(lines[1], "No such command: zap");
    assert_eq!(lines[3], "still here");
}

#[test]
fn halt_ends_the_session() {
    let mut screen = MemoryScreen::new(30, 5);
    let mut input = ScriptedInput::new()
        .key(Key::Ctrl('c'))
        .line("echo never");
    let mut session = session(30, 5);
    session.run(&mut input, &mut screen).unwrap();

    assert!(!session.is_running());
    assert_eq!(input.remaining(), 11);
}

#[test]
fn quit_command_ends_the_session() {
    let mut screen = MemoryScreen::new(30, 5);
    let mut input = ScriptedInput::new().line("quit").line("echo never");
    let mut session = session(30, 5);
    session.run(&mut input, &mut screen).unwrap();
    assert!(!session.is_running());
    assert!(!screen.lines().iter().any(|l| l == "never"));
}

#[test]
fn unbound_keys_are_reported() {
    let mut screen = MemoryScreen::new(30, 4);
    let mut input = ScriptedInput::new().key(Key::Function(9));
    let mut session = session(30, 4);
    session.run(&mut input, &mut screen).unwrap();
    assert_eq!(screen.row_text(0), "unbound key: f9");
}

#[test]
fn stray_control_chars_are_reported_not_swallowed() {
    let mut screen = MemoryScreen::new(30, 4);
    let mut input = ScriptedInput::new().text("ab\u{7}c");
    let mut session = session(30, 4);
    session.run(&mut input, &mut screen).unwrap();
    assert_eq!(screen.row_text(0), "unbound key: u+0007");
    assert_eq!(session.editor().text(), "abc");
}

#[test]
fn history_recall_resubmits() {
    let mut screen = MemoryScreen::new(30, 6);
    let mut input = ScriptedInput::new()
        .line("echo again")
        .key(Key::Up)
        .key(Key::Enter);
    let mut session = session(30, 6);
    session.run(&mut input, &mut screen).unwrap();

    let lines = screen.lines();
    assert_eq!(lines[2], " > echo again");
    assert_eq!(lines[3], "again");
    assert_eq!(session.editor().history().len(), 1);
}

#[test]
fn tab_completes_aliases_defined_in_session() {
    let mut screen = MemoryScreen::new(40, 5);
    let mut input = ScriptedInput::new()
        .line("alias fireball roll 8d6")
        .text("fire")
        .key(Key::Tab);
    let mut session = session(40, 5);
    session.run(&mut input, &mut screen).unwrap();
    assert_eq!(session.editor().text(), "fireball ");
}

#[test]
fn paste_and_resize() {
    let mut screen = MemoryScreen::new(30, 5);
    let mut input = ScriptedInput::new()
        .event(InputEvent::Paste("echo a\nb".to_string()))
        .event(InputEvent::Resize { width: 20, height: 3 });
    let mut session = session(30, 5);
    session.run(&mut input, &mut screen).unwrap();
    assert_eq!(session.editor().text(), "echo a b");
    assert_eq!(session.pager().rows(), 2);
    assert_eq!(session.pager().width(), 20);
}

#[test]
fn startup_file_runs_silently() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("startup.dandy");
    fs::write(&path, "alias greet echo hi\necho loaded\n").unwrap();

    let mut screen = MemoryScreen::new(30, 4);
    let config = ShellConfig::default().with_seed(1);
    let mut session = Session::from_config(&config, 30, 4).unwrap();
    session.run_startup(&path, &mut screen).unwrap();

    assert!(session.pager().scrollback().is_empty());
    assert!(screen.lines().iter().all(String::is_empty));
    assert!(session.interpreter().aliases().contains_key("greet"));

    let mut input = ScriptedInput::new().line("greet");
    session.run(&mut input, &mut screen).unwrap();
    assert_eq!(screen.row_text(1), "hi");
}
