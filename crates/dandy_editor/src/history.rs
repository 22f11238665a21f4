//! Submitted-line history.
//!
//! Entries are kept newest first behind a blank sentinel at slot 0. Browsing
//! wraps in both directions, so cycling past the newest entry lands on the
//! blank line and cycling past the oldest lands back on it too.

use std::collections::VecDeque;

/// Default number of lines kept.
pub const DEFAULT_CAPACITY: usize = 1000;

/// A deduplicating, circular history of submitted lines.
#[derive(Clone, Debug)]
pub struct History {
    /// Slot 0 is the blank sentinel; slot 1 is the most recent line.
    entries: VecDeque<String>,
    /// Browsing position, always `< entries.len()`.
    position: usize,
    /// Maximum number of lines kept, excluding the sentinel.
    capacity: usize,
}

impl History {
    /// Creates an empty history with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty history keeping at most `capacity` lines.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::from([String::new()]),
            position: 0,
            capacity,
        }
    }

    /// Records a submitted line as the most recent entry.
    ///
    /// An earlier copy of the same line is dropped first. Browsing resets to
    /// the blank slot rather than onto the new entry: the input row starts
    /// out empty after a submission, and the next
    /// [`cycle_older`](Self::cycle_older) recalls this line.
    pub fn add(&mut self, line: &str) {
        self.position = 0;
        if line.is_empty() {
            return;
        }
        self.entries.retain(|entry| entry != line);
        self.entries.insert(1, line.to_string());
        while self.entries.len() > self.capacity + 1 {
            self.entries.pop_back();
        }
    }

    /// Moves one entry toward the oldest, wrapping to the blank slot.
    pub fn cycle_older(&mut self) -> &str {
        self.position = (self.position + 1) % self.entries.len();
        self.current()
    }

    /// Moves one entry toward the newest, wrapping to the oldest.
    pub fn cycle_newer(&mut self) -> &str {
        let count = self.entries.len();
        self.position = (self.position + count - 1) % count;
        self.current()
    }

    /// Returns the entry at the browsing position.
    #[must_use]
    pub fn current(&self) -> &str {
        self.entries
            .get(self.position)
            .map_or("", String::as_str)
    }

    /// Returns the browsing position (0 is the blank slot).
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the most recently added line.
    #[must_use]
    pub fn most_recent(&self) -> Option<&str> {
        self.entries.get(1).map(String::as_str)
    }

    /// Returns the number of recorded lines, excluding the blank slot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    /// Returns true if no lines have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over recorded lines, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().skip(1).map(String::as_str)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
