//! The input line.
//!
//! [`LineEditor`] owns the buffer being composed together with its
//! [`Cursor`] and [`History`]. Keys are looked up in a [`Keymap`]; a bound
//! key runs its [`KeyAction`], an unbound printable key is inserted at the
//! cursor, and anything else is handed back as
//! [`EditorEvent::Unrecognized`] for the session to report.
//!
//! The editor never runs commands itself. A submission comes back as
//! [`EditorEvent::Submitted`] and the caller decides what to do with it.

use dandy_foundation::Result;
use unicode_width::UnicodeWidthStr;

use crate::cursor::Cursor;
use crate::history::History;
use crate::key::{Key, KeyAction, Keymap};
use crate::screen::Screen;

/// What a keystroke did to the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    /// The buffer or cursor changed and the input row needs repainting.
    Changed,
    /// A line was submitted; the buffer is now empty.
    Submitted(String),
    /// The key is neither bound nor printable.
    Unrecognized(Key),
    /// The halt action was requested.
    Halt,
    /// The key was handled but nothing changed.
    Ignored,
}

/// Buffer, cursor and history for the single input row.
#[derive(Clone, Debug, Default)]
pub struct LineEditor {
    buffer: Vec<char>,
    cursor: Cursor,
    history: History,
    commands: Vec<String>,
}

impl LineEditor {
    /// Creates an empty editor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty editor with a specific history.
    #[must_use]
    pub fn with_history(history: History) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    /// Sets the command names offered by tab completion.
    pub fn set_commands<I, S>(&mut self, commands: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands = commands.into_iter().map(Into::into).collect();
    }

    /// Returns the buffer contents.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Returns the cursor.
    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Returns the history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Handles one keystroke.
    pub fn handle_key(&mut self, key: &Key, keymap: &Keymap) -> EditorEvent {
        if let Some(action) = keymap.lookup(key) {
            return self.apply(action);
        }
        match key {
            Key::Char(c) if key.is_printable() => {
                self.insert_char(*c);
                EditorEvent::Changed
            }
            other => {
                tracing::debug!(key = %other, "unbound key");
                EditorEvent::Unrecognized(other.clone())
            }
        }
    }

    /// Runs an action.
    pub fn apply(&mut self, action: KeyAction) -> EditorEvent {
        let len = self.buffer.len();
        match action {
            KeyAction::Submit => return self.submit(),
            KeyAction::DeleteBackward => {
                let pos = self.cursor.position();
                if pos == 0 {
                    return EditorEvent::Ignored;
                }
                self.buffer.remove(pos - 1);
                self.cursor.move_by(-1, self.buffer.len());
            }
            KeyAction::DeleteForward => {
                let pos = self.cursor.position();
                if pos >= len {
                    return EditorEvent::Ignored;
                }
                self.buffer.remove(pos);
                self.cursor.clamp_to(self.buffer.len());
            }
            KeyAction::TabComplete => return self.tab_complete(),
            KeyAction::MoveLeft => {
                self.cursor.move_by(-1, len);
            }
            KeyAction::MoveRight => {
                self.cursor.move_by(1, len);
            }
            KeyAction::MoveToStart => self.cursor.to_start(),
            KeyAction::MoveToEnd => self.cursor.to_end(len),
            KeyAction::HistoryOlder => {
                let line = self.history.cycle_older().to_string();
                self.replace_buffer(&line);
            }
            KeyAction::HistoryNewer => {
                let line = self.history.cycle_newer().to_string();
                self.replace_buffer(&line);
            }
            KeyAction::Halt => return EditorEvent::Halt,
        }
        EditorEvent::Changed
    }

    /// Inserts a character at the cursor and advances past it.
    ///
    /// Control characters are dropped so they never reach the screen.
    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let pos = self.cursor.position();
        self.buffer.insert(pos, c);
        self.cursor.move_by(1, self.buffer.len());
    }

    /// Inserts pasted text at the cursor. Line breaks become spaces.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' || c == '\r' {
                self.insert_char(' ');
            } else {
                self.insert_char(c);
            }
        }
    }

    /// Submits the buffer.
    ///
    /// A buffer that is empty or only whitespace is left alone, since
    /// there is no command in it. Otherwise the line is recorded in the
    /// history and the buffer is cleared.
    pub fn submit(&mut self) -> EditorEvent {
        let line = self.text();
        if line.trim().is_empty() {
            return EditorEvent::Ignored;
        }
        self.history.add(&line);
        self.buffer.clear();
        self.cursor.to_start();
        EditorEvent::Submitted(line)
    }

    /// Completes the last word of the buffer against the command names.
    ///
    /// Only a prefix of exactly one command is completed; the word is
    /// replaced with the full name and a trailing space.
    pub fn tab_complete(&mut self) -> EditorEvent {
        let start = self
            .buffer
            .iter()
            .rposition(|c| c.is_whitespace())
            .map_or(0, |i| i + 1);
        let word: String = self.buffer[start..].iter().collect::<String>().to_lowercase();
        if word.is_empty() {
            return EditorEvent::Ignored;
        }

        let mut matches = self
            .commands
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&word));
        let (Some(name), None) = (matches.next(), matches.next()) else {
            return EditorEvent::Ignored;
        };

        self.buffer.truncate(start);
        self.buffer.extend(name.chars());
        self.buffer.push(' ');
        self.cursor.to_end(self.buffer.len());
        EditorEvent::Changed
    }

    /// Paints the prompt and buffer on `row`, scrolling horizontally so the
    /// caret stays visible, and places the caret.
    ///
    /// # Errors
    ///
    /// Returns an error if the screen cannot be written.
    pub fn render<S: Screen + ?Sized>(&self, screen: &mut S, row: u16, prompt: &str) -> Result<()> {
        let (width, _) = screen.size()?;
        let prompt_width = prompt.width();
        let available = usize::from(width).saturating_sub(prompt_width).max(1);

        // Drop characters from the left until the caret fits.
        let caret = self.cursor.column(&self.buffer);
        let mut skip = 0;
        let mut skipped_width = 0;
        while caret - skipped_width >= available && skip < self.buffer.len() {
            skipped_width += Cursor::width_of(self.buffer[skip]);
            skip += 1;
        }
        let visible: String = self.buffer[skip..].iter().collect();

        screen.clear_row(row)?;
        screen.write_at(row, 0, prompt)?;
        let text_col = to_u16(prompt_width);
        screen.write_at(row, text_col, &visible)?;
        screen.set_cursor(row, to_u16(prompt_width + caret - skipped_width))
    }

    fn replace_buffer(&mut self, line: &str) {
        self.buffer = line.chars().collect();
        self.cursor.to_end(self.buffer.len());
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
