//! Command interpreter, terminal session, and CLI for Dandy.
//!
//! This crate provides:
//! - [`CommandInterpreter`] - Alias and sub-command expansion, builtin dispatch
//! - [`Session`] - The event loop tying editor, pager and interpreter together
//! - [`CrosstermScreen`], [`CrosstermInput`], [`TerminalGuard`] - The real terminal
//! - [`ShellConfig`] - Configuration and the files it loads

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod interpreter;
pub mod logging;
pub mod session;
pub mod terminal;

pub use config::{ShellConfig, parse_bestiary, parse_keymap};
pub use interpreter::{CommandInterpreter, Outcome};
pub use logging::init_file_logging;
pub use session::Session;
pub use terminal::{CrosstermInput, CrosstermScreen, TerminalGuard};
