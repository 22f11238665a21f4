//! Dandy - Dice and creature macros for tabletop games
//!
//! This crate re-exports all layers of the Dandy shell for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: dandy_runtime    - Interpreter, session loop, terminal, CLI
//! Layer 2: dandy_editor     - Keys, cursor, history, line editor, pager
//! Layer 1: dandy_parser     - Phrase resolution, bestiary
//!          dandy_dice       - Dice notation, rolling, to-hit
//! Layer 0: dandy_foundation - Error types
//! ```

pub use dandy_dice as dice;
pub use dandy_editor as editor;
pub use dandy_foundation as foundation;
pub use dandy_parser as parser;
pub use dandy_runtime as runtime;
