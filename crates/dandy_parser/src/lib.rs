//! Phrase resolution for the Dandy command line.
//!
//! This crate turns typed input like "kni long" into the full phrase the
//! player meant ("knight" then "longsword") without requiring them to type
//! it out.
//!
//! # Architecture
//!
//! ```text
//! "kni long"
//!      │
//!      ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["kni", "long"]
//! └─────────────────┘
//!      │
//!      ▼
//! ┌─────────────────┐
//! │ COLUMN SCAN     │  → column 0: {"knight"} unique → "knight"
//! │                 │    column 1: {} inconclusive → stop
//! └─────────────────┘
//!      │
//!      ▼
//! ┌─────────────────┐
//! │ PREFIX FALLBACK │  → "knight" is a known phrase → matched, remainder "long"
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`] - Whitespace tokenization with case folding
//! - [`phrase`] - The set of phrases a resolution stage may match
//! - [`resolver`] - Two-stage phrase resolution
//! - [`bestiary`] - Creatures, their actions, and the macros they expose

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bestiary;
pub mod phrase;
pub mod resolver;
pub mod tokenizer;

pub use bestiary::{Ability, Bestiary, Creature, CreatureAction, Macro};
pub use phrase::PhraseSet;
pub use resolver::{PhraseMatch, PhraseResolver, Resolution};
pub use tokenizer::{InputToken, InputTokenizer};
