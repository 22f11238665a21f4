//! Line editing and terminal rendering for Dandy.
//!
//! This crate provides:
//! - [`Key`], [`KeyAction`], [`Keymap`] - Symbolic keys and what they do
//! - [`Cursor`] - A clamped insertion point within the input line
//! - [`History`] - Circular recall of submitted lines
//! - [`LineEditor`] - Turns keystrokes into buffer edits and submissions
//! - [`OutputPager`] - Wrapped, bounded scrollback above the input line
//! - [`Screen`], [`KeySource`] - The terminal capabilities everything draws
//!   to and reads from, with in-memory implementations for tests

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cursor;
pub mod history;
pub mod input;
pub mod key;
pub mod line_editor;
pub mod pager;
pub mod screen;

pub use cursor::Cursor;
pub use history::History;
pub use input::{InputEvent, KeySource, ScriptedInput};
pub use key::{Component, Key, KeyAction, Keymap};
pub use line_editor::{EditorEvent, LineEditor};
pub use pager::{OutputPager, Scrollback, wrap};
pub use screen::{MemoryScreen, Screen};
