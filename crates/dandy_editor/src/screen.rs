//! The screen capability.
//!
//! Components draw through [`Screen`] and never touch the terminal
//! directly. Two regions are addressed: the scrollback rows at the top and
//! the single input row at the bottom.

use dandy_foundation::Result;
use unicode_width::UnicodeWidthChar;

/// Something text can be painted onto.
pub trait Screen {
    /// Returns `(width, height)` in cells.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried.
    fn size(&self) -> Result<(u16, u16)>;

    /// Writes text starting at a cell. Text past the right edge is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_at(&mut self, row: u16, col: u16, text: &str) -> Result<()>;

    /// Blanks a whole row.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn clear_row(&mut self, row: u16) -> Result<()>;

    /// Places the visible caret.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn set_cursor(&mut self, row: u16, col: u16) -> Result<()>;

    /// Flushes pending output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn refresh(&mut self) -> Result<()>;
}

/// An in-memory screen.
#[derive(Clone, Debug)]
pub struct MemoryScreen {
    width: u16,
    height: u16,
    cells: Vec<Vec<char>>,
    cursor: (u16, u16),
    refreshes: usize,
}

impl MemoryScreen {
    /// Creates a blank screen.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![' '; usize::from(width)]; usize::from(height)],
            cursor: (0, 0),
            refreshes: 0,
        }
    }

    /// Changes the size, blanking the contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self {
            refreshes: self.refreshes,
            ..Self::new(width, height)
        };
    }

    /// Returns a row's text with trailing blanks removed.
    #[must_use]
    pub fn row_text(&self, row: u16) -> String {
        self.cells
            .get(usize::from(row))
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Returns every row's text.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|row| self.row_text(row)).collect()
    }

    /// Returns the caret position as `(row, col)`.
    #[must_use]
    pub const fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    /// Returns how many times the screen was refreshed.
    #[must_use]
    pub const fn refreshes(&self) -> usize {
        self.refreshes
    }
}

impl Screen for MemoryScreen {
    fn size(&self) -> Result<(u16, u16)> {
        Ok((self.width, self.height))
    }

    fn write_at(&mut self, row: u16, col: u16, text: &str) -> Result<()> {
        let Some(cells) = self.cells.get_mut(usize::from(row)) else {
            return Ok(());
        };
        let mut col = usize::from(col);
        for c in text.chars() {
            let width = c.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            if col + width > cells.len() {
                break;
            }
            cells[col] = c;
            // Wide characters occupy a trailing cell the terminal leaves blank.
            for cell in cells.iter_mut().skip(col + 1).take(width - 1) {
                *cell = ' ';
            }
            col += width;
        }
        Ok(())
    }

    fn clear_row(&mut self, row: u16) -> Result<()> {
        if let Some(cells) = self.cells.get_mut(usize::from(row)) {
            cells.fill(' ');
        }
        Ok(())
    }

    fn set_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        self.cursor = (row, col);
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.refreshes += 1;
        Ok(())
    }
}
