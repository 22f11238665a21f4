//! Dice evaluation.
//!
//! A [`Roller`] owns the random number generator. Seeding it makes every
//! roll reproducible, which is how the tests pin down results.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use dandy_foundation::{Error, ErrorKind, Result};

use crate::notation::{DiceRollSpec, MAX_DICE};

/// The outcome of rolling a [`DiceRollSpec`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceRoll {
    /// The notation that was rolled.
    pub spec: DiceRollSpec,
    /// Individual die results, in the order thrown.
    pub rolls: Vec<u32>,
    /// Sum of the rolls plus the modifier.
    pub total: i64,
}

impl DiceRoll {
    /// Returns the flat modifier that was applied.
    #[must_use]
    pub const fn modifier(&self) -> i32 {
        self.spec.modifier
    }

    /// Returns the individual dice and the modifier, e.g. `[3, 5] + 2`.
    #[must_use]
    pub fn breakdown(&self) -> String {
        format_breakdown(&self.rolls, self.spec.modifier)
    }

    /// Returns the sum of the dice alone.
    #[must_use]
    pub fn dice_sum(&self) -> i64 {
        self.rolls.iter().map(|&r| i64::from(r)).sum()
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.total, self.breakdown())
    }
}

/// Formats `[a, b, c] + m` (or `- |m|` for negative modifiers).
pub(crate) fn format_breakdown(rolls: &[u32], modifier: i32) -> String {
    let rolls = rolls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if modifier < 0 {
        format!("[{rolls}] - {}", modifier.unsigned_abs())
    } else {
        format!("[{rolls}] + {modifier}")
    }
}

/// Rolls dice with a seedable generator.
#[derive(Clone, Debug)]
pub struct Roller {
    rng: ChaCha8Rng,
}

impl Roller {
    /// Creates a roller seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Creates a deterministic roller.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Rolls a single die with the given number of sides.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if `sides` is zero.
    pub fn die(&mut self, sides: u32) -> Result<u32> {
        if sides == 0 {
            return Err(Error::new(ErrorKind::InvalidRange { sides }));
        }
        Ok(self.rng.gen_range(1..=sides))
    }

    /// Rolls a parsed spec.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` for zero-sided dice (even when no dice are
    /// thrown) and `TooManyDice` above [`MAX_DICE`].
    pub fn roll(&mut self, spec: &DiceRollSpec) -> Result<DiceRoll> {
        if spec.sides == 0 {
            return Err(Error::new(ErrorKind::InvalidRange { sides: spec.sides }));
        }
        if spec.count > MAX_DICE {
            return Err(Error::new(ErrorKind::TooManyDice {
                count: spec.count,
                limit: MAX_DICE,
            }));
        }

        let rolls: Vec<u32> = (0..spec.count)
            .map(|_| self.rng.gen_range(1..=spec.sides))
            .collect();
        let total = rolls.iter().map(|&r| i64::from(r)).sum::<i64>() + i64::from(spec.modifier);

        tracing::debug!(notation = %spec, total, "rolled dice");
        Ok(DiceRoll {
            spec: *spec,
            rolls,
            total,
        })
    }

    /// Parses and rolls notation in one step.
    ///
    /// # Errors
    ///
    /// Returns any parse or evaluation error.
    pub fn roll_notation(&mut self, text: &str) -> Result<DiceRoll> {
        let spec = DiceRollSpec::parse(text)?;
        self.roll(&spec)
    }
}

impl Default for Roller {
    fn default() -> Self {
        Self::new()
    }
}
