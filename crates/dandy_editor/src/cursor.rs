//! Insertion point within the input line.
//!
//! Positions count characters, not bytes or cells. Every setter clamps into
//! `[0, len]`, so the cursor can never point past the buffer it edits.

use unicode_width::UnicodeWidthChar;

/// A clamped offset into a line buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pos: usize,
}

impl Cursor {
    /// Creates a cursor at the start of the line.
    #[must_use]
    pub const fn new() -> Self {
        Self { pos: 0 }
    }

    /// Returns the current offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Moves to `requested`, clamped into `[0, len]`. Returns the new offset.
    pub fn set_position(&mut self, requested: isize, len: usize) -> usize {
        self.pos = usize::try_from(requested).unwrap_or(0).min(len);
        self.pos
    }

    /// Moves by `delta`, clamped into `[0, len]`. Returns the new offset.
    pub fn move_by(&mut self, delta: isize, len: usize) -> usize {
        self.pos = self.pos.saturating_add_signed(delta).min(len);
        self.pos
    }

    /// Re-clamps after the buffer changed length.
    pub fn clamp_to(&mut self, len: usize) {
        self.pos = self.pos.min(len);
    }

    /// Moves to the start.
    pub fn to_start(&mut self) {
        self.pos = 0;
    }

    /// Moves to the end of a buffer of `len` characters.
    pub fn to_end(&mut self, len: usize) {
        self.pos = len;
    }

    /// Returns the display column of the caret within `buffer`.
    #[must_use]
    pub fn column(&self, buffer: &[char]) -> usize {
        buffer
            .iter()
            .take(self.pos)
            .map(|&c| Self::width_of(c))
            .sum()
    }

    /// Returns the number of cells a character occupies.
    #[must_use]
    pub fn width_of(c: char) -> usize {
        c.width().unwrap_or(0)
    }
}
