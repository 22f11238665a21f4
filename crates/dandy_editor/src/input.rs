//! Keystroke input.

use std::collections::VecDeque;

use dandy_foundation::Result;

use crate::key::Key;

/// One event from the keyboard side of the terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A keystroke.
    Key(Key),
    /// Bracketed paste.
    Paste(String),
    /// The terminal changed size.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

/// Produces input events one at a time.
pub trait KeySource {
    /// Blocks until the next event.
    ///
    /// Returns `Ok(None)` when input is exhausted or an interrupt asked the
    /// session to stop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn next_event(&mut self) -> Result<Option<InputEvent>>;
}

/// A pre-recorded sequence of events.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one key.
    #[must_use]
    pub fn key(mut self, key: Key) -> Self {
        self.events.push_back(InputEvent::Key(key));
        self
    }

    /// Appends each character of `text` as a key.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.events
            .extend(text.chars().map(|c| InputEvent::Key(Key::Char(c))));
        self
    }

    /// Appends `text` followed by Enter.
    #[must_use]
    pub fn line(self, text: &str) -> Self {
        self.text(text).key(Key::Enter)
    }

    /// Appends an arbitrary event.
    #[must_use]
    pub fn event(mut self, event: InputEvent) -> Self {
        self.events.push_back(event);
        self
    }

    /// Returns the number of events not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl KeySource for ScriptedInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}
