//! Evaluation tests.

use dandy_dice::{DiceRollSpec, MAX_DICE, Roller, ToHit, ability_modifier};
use dandy_foundation::ErrorKind;
use proptest::prelude::*;

#[test]
fn seeded_rollers_agree() {
    let mut a = Roller::seeded(99);
    let mut b = Roller::seeded(99);
    for _ in 0..20 {
        assert_eq!(
            a.roll_notation("3d6+1").unwrap(),
            b.roll_notation("3d6+1").unwrap()
        );
    }
}

#[test]
fn zero_dice_totals_the_modifier() {
    let roll = Roller::seeded(1).roll_notation("0d6+7").unwrap();
    assert!(roll.rolls.is_empty());
    assert_eq!(roll.total, 7);
}

#[test]
fn zero_sides_is_invalid_range() {
    let mut roller = Roller::seeded(1);
    for text in ["1d0", "0d0", "5d0+2"] {
        let err = roller.roll_notation(text).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidRange { sides: 0 }));
    }
}

#[test]
fn too_many_dice() {
    let spec = DiceRollSpec::new(MAX_DICE + 1, 6, 0);
    let err = Roller::seeded(1).roll(&spec).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TooManyDice { .. }));
}

#[test]
fn rendering() {
    let mut roller = Roller::seeded(5);
    assert_eq!(roller.roll_notation("2d1+3").unwrap().to_string(), "5 | [1, 1] + 3");
    assert_eq!(roller.roll_notation("1d1-4").unwrap().to_string(), "-3 | [1] - 4");
}

#[test]
fn to_hit_confirms_naturals() {
    let mut roller = Roller::seeded(0);
    for _ in 0..500 {
        let hit = ToHit::roll(&mut roller, 2);
        let text = hit.to_string();
        match hit.natural {
            20 => assert!(text.contains("\nRolling to confirm crit...\n")),
            1 => assert!(text.contains("\nRolling to confirm fumble...\n")),
            _ => assert_eq!(text.lines().count(), 1),
        }
        assert!(text.starts_with(&format!("{} to hit | [{}] + 2", hit.total(), hit.natural)));
    }
}

#[test]
fn ability_modifiers_floor() {
    assert_eq!(ability_modifier(1), -5);
    assert_eq!(ability_modifier(9), -1);
    assert_eq!(ability_modifier(10), 0);
    assert_eq!(ability_modifier(15), 2);
    assert_eq!(ability_modifier(20), 5);
}

proptest! {
    #[test]
    fn rolls_stay_in_range(count in 1u32..50, sides in 1u32..100, modifier in -50i32..50, seed in any::<u64>()) {
        let spec = DiceRollSpec::new(count, sides, modifier);
        let roll = Roller::seeded(seed).roll(&spec).unwrap();
        prop_assert_eq!(roll.rolls.len(), count as usize);
        prop_assert!(roll.rolls.iter().all(|&r| (1..=sides).contains(&r)));
        let sum: i64 = roll.rolls.iter().map(|&r| i64::from(r)).sum();
        prop_assert_eq!(roll.total, sum + i64::from(modifier));
    }
}
