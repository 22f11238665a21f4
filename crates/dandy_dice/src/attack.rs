//! Attack rolls and ability modifiers.

use std::fmt;

use crate::roller::{Roller, format_breakdown};

/// Why a to-hit roll was rolled a second time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    /// Natural 20.
    Crit,
    /// Natural 1.
    Fumble,
}

impl Confirmation {
    fn label(self) -> &'static str {
        match self {
            Self::Crit => "crit",
            Self::Fumble => "fumble",
        }
    }
}

/// A d20 attack roll, re-rolled once to confirm a natural 20 or natural 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToHit {
    /// Attack bonus added to each d20.
    pub modifier: i32,
    /// The first d20.
    pub natural: u32,
    /// The confirmation roll, if one was needed.
    pub confirm: Option<(Confirmation, u32)>,
}

impl ToHit {
    /// Rolls to hit with the given attack bonus.
    pub fn roll(roller: &mut Roller, modifier: i32) -> Self {
        let natural = roll_d20(roller);
        let confirm = match natural {
            20 => Some((Confirmation::Crit, roll_d20(roller))),
            1 => Some((Confirmation::Fumble, roll_d20(roller))),
            _ => None,
        };
        Self {
            modifier,
            natural,
            confirm,
        }
    }

    /// Returns the first roll plus the modifier.
    #[must_use]
    pub fn total(&self) -> i64 {
        i64::from(self.natural) + i64::from(self.modifier)
    }
}

fn roll_d20(roller: &mut Roller) -> u32 {
    // A d20 always has faces.
    roller.die(20).unwrap_or(1)
}

impl fmt::Display for ToHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_line(f, self.natural, self.modifier)?;
        if let Some((kind, natural)) = self.confirm {
            write!(f, "\nRolling to confirm {}...\n", kind.label())?;
            write_line(f, natural, self.modifier)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, natural: u32, modifier: i32) -> fmt::Result {
    let total = i64::from(natural) + i64::from(modifier);
    write!(
        f,
        "{total} to hit | {}",
        format_breakdown(&[natural], modifier)
    )
}

/// Converts an ability score to its modifier, rounding toward negative infinity.
#[must_use]
pub const fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}
