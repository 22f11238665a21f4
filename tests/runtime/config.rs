//! Configuration loading tests.

use std::fs;

use dandy_editor::{Key, KeyAction};
use dandy_foundation::ErrorKind;
use dandy_runtime::ShellConfig;
use tempfile::TempDir;

#[test]
fn loads_keymap_and_bestiary_files() {
    let dir = TempDir::new().unwrap();
    let keys = dir.path().join("keys.json");
    let creatures = dir.path().join("bestiary.json");
    fs::write(&keys, r#"{ "ctrl-k": ["cursor", "move_to_end"] }"#).unwrap();
    fs::write(
        &creatures,
        r#"{ "Owlbear": { "str": 20, "actions": { "Claws": [7, "2d8+5", "slashing"] } } }"#,
    )
    .unwrap();

    let config = ShellConfig::default()
        .with_seed(11)
        .with_keymap(&keys)
        .with_bestiary(&creatures);

    let keymap = config.keymap().unwrap();
    assert_eq!(keymap.lookup(&Key::Ctrl('k')), Some(KeyAction::MoveToEnd));

    let mut interp = config.interpreter().unwrap();
    let text = interp.interpret("owl claws").unwrap().text;
    assert!(text.starts_with("Owlbear uses Claws\n"));
    assert!(text.ends_with("] + 5"));
}

#[test]
fn missing_files_are_reported() {
    let dir = TempDir::new().unwrap();
    let config = ShellConfig::default().with_bestiary(dir.path().join("nope.json"));
    let err = config.interpreter().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::FileNotFound(_)));
}

#[test]
fn bad_damage_names_the_creature() {
    let dir = TempDir::new().unwrap();
    let creatures = dir.path().join("bestiary.json");
    fs::write(
        &creatures,
        r#"{ "Imp": { "actions": { "Sting": [5, "1x4", "piercing"] } } }"#,
    )
    .unwrap();
    let err = ShellConfig::default()
        .with_bestiary(&creatures)
        .bestiary()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Config(_)));
    assert!(err.to_string().contains("Imp Sting"));
}

#[test]
fn same_seed_same_rolls() {
    let config = ShellConfig::default().with_seed(99);
    let mut first = config.interpreter().unwrap();
    let mut second = config.interpreter().unwrap();
    assert_eq!(
        first.interpret("roll 4d20").unwrap(),
        second.interpret("roll 4d20").unwrap()
    );
}
