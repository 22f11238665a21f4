//! Batch file tests.

use std::fs;

use dandy_dice::Roller;
use dandy_foundation::ErrorKind;
use dandy_runtime::CommandInterpreter;
use tempfile::TempDir;

fn interpreter() -> CommandInterpreter {
    CommandInterpreter::new().with_roller(Roller::seeded(5))
}

#[test]
fn runs_every_line_and_skips_comments() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("setup.dandy");
    fs::write(&path, "# party setup\nalias fb roll 8d1\n\necho ready\nfb\n").unwrap();

    let mut interp = interpreter();
    let outcome = interp.exec_file(&path).unwrap();
    assert_eq!(outcome.text, "ready\n8 | [1, 1, 1, 1, 1, 1, 1, 1] + 0");
    assert!(interp.aliases().contains_key("fb"));
}

#[test]
fn errors_name_file_and_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.dandy");
    fs::write(&path, "echo one\nbogus\necho three\n").unwrap();

    let outcome = interpreter().exec_file(&path).unwrap();
    let lines: Vec<&str> = outcome.text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("No such command: bogus"));
    assert!(lines[1].contains(":2"));
    assert_eq!(lines[2], "three");
}

#[test]
fn nested_exec_is_relative_to_the_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    fs::write(dir.path().join("lib").join("inner.dandy"), "echo inner").unwrap();
    fs::write(dir.path().join("lib").join("outer.dandy"), "exec inner.dandy\necho outer").unwrap();

    let outcome = interpreter()
        .exec_file(&dir.path().join("lib").join("outer.dandy"))
        .unwrap();
    assert_eq!(outcome.text, "inner\nouter");
}

#[test]
fn halt_stops_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stop.dandy");
    fs::write(&path, "echo before\nquit\necho after\n").unwrap();

    let outcome = interpreter().exec_file(&path).unwrap();
    assert!(outcome.halt);
    assert_eq!(outcome.text, "before");
}

#[test]
fn self_exec_hits_the_depth_limit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loop.dandy");
    fs::write(&path, "exec loop.dandy\n").unwrap();

    let mut interp = interpreter().with_max_depth(4);
    let outcome = interp.exec_file(&path).unwrap();
    assert!(outcome.text.contains("expansion too deep (limit 4)"));
}

#[test]
fn missing_file() {
    let dir = TempDir::new().unwrap();
    let err = interpreter()
        .exec_file(&dir.path().join("absent.dandy"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::FileNotFound(_)));
}
