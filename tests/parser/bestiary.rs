//! Bestiary and creature macro tests.

use dandy_dice::Roller;
use dandy_parser::{Ability, Bestiary, Creature, CreatureAction, Macro, PhraseResolver};

fn bestiary() -> Bestiary {
    let mut bestiary = Bestiary::new();
    bestiary.insert(
        Creature::new("Knight")
            .with_ability(Ability::Str, 16)
            .with_ability(Ability::Dex, 9)
            .with_action(CreatureAction::new("Longsword", 5, "1d8+3", "slashing").unwrap())
            .with_action(CreatureAction::new("Heavy Crossbow", 2, "1d10", "piercing").unwrap()),
    );
    bestiary.insert(Creature::new("Kobold").with_ability(Ability::Dex, 15));
    bestiary.insert(Creature::new("Priest").with_ability(Ability::Wis, 16));
    bestiary
}

#[test]
fn creature_names_resolve_in_two_stages() {
    let bestiary = bestiary();
    let creature = PhraseResolver::resolve("kn heavy", &bestiary.phrases());
    assert_eq!(creature.phrase, "knight");

    let knight = bestiary.get(&creature.phrase).unwrap();
    let action = PhraseResolver::resolve(&creature.remainder, &knight.macro_phrases());
    assert_eq!(action.phrase, "heavy crossbow");
}

#[test]
fn ambiguous_creature_prefix() {
    let bestiary = bestiary();
    let found = PhraseResolver::resolve("k longsword", &bestiary.phrases());
    assert!(!found.is_match());
}

#[test]
fn macro_phrases_cover_actions_and_abilities() {
    let bestiary = bestiary();
    let knight = bestiary.get("KNIGHT").unwrap();
    let mut names: Vec<&str> = Vec::new();
    let phrases = knight.macro_phrases();
    names.extend(phrases.names());
    names.sort_unstable();
    assert_eq!(names, vec!["heavy crossbow", "longsword", "roll dex", "roll str"]);
}

#[test]
fn lookups() {
    let bestiary = bestiary();
    let knight = bestiary.get("knight").unwrap();
    assert!(matches!(knight.lookup("Longsword"), Some(Macro::Action(a)) if a.attack_bonus == 5));
    assert!(matches!(knight.lookup("roll dex"), Some(Macro::Check(Ability::Dex, -1))));
    assert!(knight.lookup("roll wis").is_none());
}

#[test]
fn action_output_has_three_parts() {
    let bestiary = bestiary();
    let knight = bestiary.get("knight").unwrap();
    let mut roller = Roller::seeded(21);
    let text = knight.perform("longsword", &mut roller).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Knight uses Longsword");
    assert!(lines[1].contains(" to hit | ["));
    let damage = lines.last().unwrap();
    assert!(damage.contains(" slashing damage | ["));
    assert!(damage.ends_with("] + 3"));
}

#[test]
fn ability_check_output() {
    let bestiary = bestiary();
    let priest = bestiary.get("priest").unwrap();
    let text = priest.perform("roll wis", &mut Roller::seeded(2)).unwrap();
    assert!(text.starts_with("Priest rolls wis for "));
    assert!(text.ends_with("] + 3"));
}
