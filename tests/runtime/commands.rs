//! Command interpreter tests.

use dandy_dice::Roller;
use dandy_foundation::ErrorKind;
use dandy_parser::{Ability, Bestiary, Creature, CreatureAction};
use dandy_runtime::CommandInterpreter;

fn interpreter(seed: u64) -> CommandInterpreter {
    CommandInterpreter::new().with_roller(Roller::seeded(seed))
}

#[test]
fn groups_substitute_output() {
    let mut interp = interpreter(1);
    let outcome = interp.interpret("echo (roll 1d1)").unwrap();
    assert_eq!(outcome.text, "1 | [1] + 0");
}

#[test]
fn nested_groups() {
    let mut interp = interpreter(1);
    let outcome = interp.interpret("echo [(echo a (echo b))]").unwrap();
    assert_eq!(outcome.text, "[a b]");
}

#[test]
fn alias_runs_like_its_expansion() {
    let mut aliased = interpreter(7);
    aliased.define_alias("fireball", "roll 8d6");
    let mut direct = interpreter(7);
    for _ in 0..5 {
        assert_eq!(
            aliased.interpret("fireball").unwrap(),
            direct.interpret("roll 8d6").unwrap()
        );
    }
}

#[test]
fn alias_arguments_are_appended() {
    let mut interp = interpreter(1);
    interp.interpret("alias say echo hello").unwrap();
    assert_eq!(interp.interpret("say world").unwrap().text, "hello world");
    assert_eq!(interp.interpret("alias say").unwrap().text, "say -> echo hello");
}

#[test]
fn alias_cycles_are_reported() {
    let mut interp = interpreter(1);
    interp.define_alias("a", "b");
    interp.define_alias("b", "a");
    let err = interp.interpret("a").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AliasCycle(_)));
    // The interpreter is still usable afterwards.
    assert_eq!(interp.interpret("echo ok").unwrap().text, "ok");
}

#[test]
fn prefixes_reach_builtins() {
    let mut interp = interpreter(1);
    assert_eq!(interp.interpret("ec hi").unwrap().text, "hi");
    assert!(interp.interpret("hal").unwrap().halt);
}

#[test]
fn unknown_command() {
    let mut interp = interpreter(1);
    let err = interp.interpret("zap now").unwrap_err();
    assert_eq!(err.to_string(), "No such command: zap");
}

#[test]
fn bare_notation_rolls() {
    let mut interp = interpreter(3);
    let text = interp.interpret("2d1+1").unwrap().text;
    assert_eq!(text, "3 | [1, 1] + 1");
}

#[test]
fn creature_macros_dispatch() {
    let mut bestiary = Bestiary::new();
    bestiary.insert(
        Creature::new("Goblin")
            .with_ability(Ability::Dex, 14)
            .with_action(CreatureAction::new("Scimitar", 4, "1d6+2", "slashing").unwrap()),
    );
    let mut interp = interpreter(9).with_bestiary(bestiary);

    let text = interp.interpret("gob sc").unwrap().text;
    assert!(text.starts_with("Goblin uses Scimitar\n"));

    let text = interp.interpret("goblin roll dex").unwrap().text;
    assert!(text.starts_with("Goblin rolls dex for "));

    assert!(interp.interpret("goblin bite").is_err());
}

#[test]
fn help_lists_aliases() {
    let mut interp = interpreter(1);
    interp.define_alias("fb", "roll 8d6");
    let text = interp.interpret("help").unwrap().text;
    assert!(text.starts_with("commands: "));
    assert!(text.contains("aliases: fb"));
}
