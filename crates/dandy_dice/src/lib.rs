//! Dice notation parsing and evaluation for Dandy.
//!
//! # Modules
//!
//! - [`notation`] - Parse `<count>d<sides>[+/-<modifier>]` into a [`DiceRollSpec`]
//! - [`roller`] - Evaluate notation with a seedable RNG into a [`DiceRoll`]
//! - [`attack`] - To-hit rolls with crit/fumble confirmation, ability modifiers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attack;
pub mod notation;
pub mod roller;

pub use attack::{Confirmation, ToHit, ability_modifier};
pub use notation::{DiceRollSpec, MAX_DICE};
pub use roller::{DiceRoll, Roller};
