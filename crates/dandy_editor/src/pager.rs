//! Scrollback output above the input row.
//!
//! Output is wrapped to the screen width when it is drawn, so the
//! [`Scrollback`] only ever holds display-ready rows. It keeps no more rows
//! than are visible; older rows fall off the top.

use std::collections::VecDeque;

use dandy_foundation::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::screen::Screen;

/// A FIFO of wrapped display rows with a fixed capacity.
#[derive(Clone, Debug, Default)]
pub struct Scrollback {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Scrollback {
    /// Creates an empty scrollback holding at most `capacity` rows.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a row, evicting the oldest rows past capacity.
    pub fn push(&mut self, line: String) {
        self.lines.push_back(line);
        self.evict();
    }

    /// Changes the capacity, evicting the oldest rows if it shrank.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.evict();
    }

    /// Returns the capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of rows held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no rows are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates rows oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Returns the newest row.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// Drops every row.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn evict(&mut self) {
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }
}

/// Wraps text into rows no wider than `width` cells.
///
/// Lines break at spaces where possible; a word wider than the screen is
/// split wherever it overflows. Every input line yields at least one row,
/// so blank lines survive.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        wrap_line(line.trim_end_matches('\r'), width, &mut rows);
    }
    rows
}

fn wrap_line(line: &str, width: usize, rows: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;

    for word in line.split(' ') {
        let word_width = word.width();
        if current.is_empty() && word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else if word_width <= width {
            rows.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            current_width = 0;
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if current_width + w > width && !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += w;
            }
        }
    }
    rows.push(current);
}

/// Renders command output into the rows above the input line.
#[derive(Clone, Debug)]
pub struct OutputPager {
    scrollback: Scrollback,
    width: u16,
    rows: u16,
    silent: bool,
}

impl OutputPager {
    /// Creates a pager for an output region `width` cells wide and `rows`
    /// rows tall.
    #[must_use]
    pub fn new(width: u16, rows: u16) -> Self {
        Self {
            scrollback: Scrollback::new(usize::from(rows)),
            width,
            rows,
            silent: false,
        }
    }

    /// Turns silent mode on or off. A silent pager neither buffers nor
    /// paints.
    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }

    /// Returns true if the pager is silent.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        self.silent
    }

    /// Changes the region size. Rows already wrapped keep their old width.
    pub fn resize(&mut self, width: u16, rows: u16) {
        self.width = width;
        self.rows = rows;
        self.scrollback.set_capacity(usize::from(rows));
    }

    /// Returns the region width.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Returns the region height.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Returns the retained rows.
    #[must_use]
    pub const fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    /// Wraps `text` into the scrollback without painting.
    pub fn push(&mut self, text: &str) {
        if self.silent {
            return;
        }
        for row in wrap(text, usize::from(self.width)) {
            self.scrollback.push(row);
        }
    }

    /// Wraps `text` into the scrollback and repaints the region.
    ///
    /// # Errors
    ///
    /// Returns an error if the screen cannot be written.
    pub fn draw<S: Screen + ?Sized>(&mut self, screen: &mut S, text: &str) -> Result<()> {
        if self.silent {
            return Ok(());
        }
        self.push(text);
        self.render(screen)
    }

    /// Repaints the region top-aligned from the scrollback.
    ///
    /// # Errors
    ///
    /// Returns an error if the screen cannot be written.
    pub fn render<S: Screen + ?Sized>(&self, screen: &mut S) -> Result<()> {
        if self.silent {
            return Ok(());
        }
        let mut lines = self.scrollback.iter();
        for row in 0..self.rows {
            screen.clear_row(row)?;
            if let Some(line) = lines.next() {
                screen.write_at(row, 0, line)?;
            }
        }
        Ok(())
    }
}
