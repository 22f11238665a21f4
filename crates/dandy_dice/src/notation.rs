//! Dice notation parsing.
//!
//! Grammar: `<digits> ('d' | 'D') <digits> [ws* ('+' | '-') ws* <digits>]`.
//! Whitespace may surround the modifier sign but never splits a digit group.

use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

use dandy_foundation::{Error, Result};

/// Ceiling on the number of dice a single roll may throw.
pub const MAX_DICE: u32 = 10_000;

/// A parsed dice expression such as `3d6+2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiceRollSpec {
    /// Number of dice to throw. Zero is legal and rolls nothing.
    pub count: u32,
    /// Faces per die. Zero parses but cannot be rolled.
    pub sides: u32,
    /// Flat modifier added to the sum.
    pub modifier: i32,
}

impl DiceRollSpec {
    /// Creates a roll from its parts.
    #[must_use]
    pub const fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Parses dice notation.
    ///
    /// # Errors
    ///
    /// Returns `BadNotation` if the text does not match the grammar or a
    /// number does not fit its field.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let bad = || Error::bad_notation(trimmed);
        let mut chars = trimmed.chars().peekable();

        let count = take_number(&mut chars).ok_or_else(bad)?;
        if !matches!(chars.next(), Some('d' | 'D')) {
            return Err(bad());
        }
        let sides = take_number(&mut chars).ok_or_else(bad)?;

        skip_whitespace(&mut chars);
        let modifier = match chars.next() {
            None => 0,
            Some(sign @ ('+' | '-')) => {
                skip_whitespace(&mut chars);
                let magnitude: i32 = take_number(&mut chars)
                    .and_then(|m| i32::try_from(m).ok())
                    .ok_or_else(bad)?;
                if chars.next().is_some() {
                    return Err(bad());
                }
                if sign == '-' { -magnitude } else { magnitude }
            }
            Some(_) => return Err(bad()),
        };

        Ok(Self::new(count, sides, modifier))
    }

    /// Returns true if the text parses as dice notation.
    #[must_use]
    pub fn is_notation(text: &str) -> bool {
        Self::parse(text).is_ok()
    }
}

impl FromStr for DiceRollSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DiceRollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "-{}", m.unsigned_abs()),
        }
    }
}

fn take_number(chars: &mut Peekable<Chars<'_>>) -> Option<u32> {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits.parse().ok()
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}
