//! The crossterm terminal driver.
//!
//! [`TerminalGuard`] puts the terminal into raw mode on the alternate screen
//! and puts it back when dropped, whether the session ended with `quit`, an
//! error, an interrupt or a panic. [`CrosstermScreen`] paints through it
//! and [`CrosstermInput`] reads keys from it.
//!
//! In raw mode Ctrl-C arrives as a key, not a signal. SIGINT and SIGTERM
//! from elsewhere set a flag that ends the event stream, so the loop returns
//! normally and the guard runs.

use std::io::{self, BufWriter, Stdout, Write};
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, queue, style, terminal};
use dandy_editor::{InputEvent, Key, KeySource, Screen};
use dandy_foundation::Result;
use unicode_width::UnicodeWidthChar;

/// How often the key source checks the interrupt flag while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Raw mode and the alternate screen for as long as it lives.
#[derive(Debug)]
pub struct TerminalGuard {
    restored: bool,
}

impl TerminalGuard {
    /// Enters raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal refuses either mode.
    pub fn enter() -> Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        let guard = Self { restored: false };
        crossterm::execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            event::EnableBracketedPaste
        )?;
        tracing::debug!("terminal in raw mode");
        Ok(guard)
    }

    /// Restores the terminal now instead of on drop.
    pub fn restore(&mut self) {
        if !self.restored {
            restore_terminal();
            self.restored = true;
            tracing::debug!("terminal restored");
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(
        stdout,
        event::DisableBracketedPaste,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            previous(info);
        }));
    });
}

/// The real terminal as a [`Screen`]. Output is buffered until refresh.
pub struct CrosstermScreen {
    out: BufWriter<Stdout>,
}

impl CrosstermScreen {
    /// Connects to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: BufWriter::new(io::stdout()),
        }
    }
}

impl Default for CrosstermScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for CrosstermScreen {
    fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn write_at(&mut self, row: u16, col: u16, text: &str) -> Result<()> {
        let (width, _) = terminal::size()?;
        let clipped = clip(text, usize::from(width.saturating_sub(col)));
        queue!(self.out, cursor::MoveTo(col, row), style::Print(clipped))?;
        Ok(())
    }

    fn clear_row(&mut self, row: u16) -> Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, row),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;
        Ok(())
    }

    fn set_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(self.out, cursor::MoveTo(col, row))?;
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// The real keyboard as a [`KeySource`].
pub struct CrosstermInput {
    interrupted: Arc<AtomicBool>,
}

impl CrosstermInput {
    /// Registers the interrupt flag for SIGINT and SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal handlers cannot be installed.
    pub fn new() -> Result<Self> {
        let interrupted = Arc::new(AtomicBool::new(false));
        #[cfg(unix)]
        {
            use signal_hook::consts::signal::{SIGINT, SIGTERM};
            signal_hook::flag::register(SIGINT, Arc::clone(&interrupted))?;
            signal_hook::flag::register(SIGTERM, Arc::clone(&interrupted))?;
        }
        Ok(Self { interrupted })
    }

    /// Returns true once an interrupt signal has arrived.
    #[must_use]
    pub fn interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Relaxed)
    }
}

impl KeySource for CrosstermInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        loop {
            if self.interrupted() {
                tracing::info!("interrupted");
                return Ok(None);
            }
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    return Ok(Some(InputEvent::Key(map_key(key))));
                }
                Event::Paste(text) => return Ok(Some(InputEvent::Paste(text))),
                Event::Resize(width, height) => {
                    return Ok(Some(InputEvent::Resize { width, height }));
                }
                _ => {}
            }
        }
    }
}

/// Cuts `text` to at most `cells` display cells.
fn clip(text: &str, cells: usize) -> &str {
    let mut used = 0;
    for (index, c) in text.char_indices() {
        used += c.width().unwrap_or(0);
        if used > cells {
            return &text[..index];
        }
    }
    text
}

/// Translates a crossterm key into a symbolic key.
#[must_use]
pub fn map_key(event: KeyEvent) -> Key {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        KeyCode::F(n) => Key::Function(n),
        other => Key::Unknown(format!("{other:?}").to_lowercase()),
    }
}
