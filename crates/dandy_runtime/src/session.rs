//! The interactive session.
//!
//! A [`Session`] owns every piece of mutable shell state: the line editor
//! (with its cursor and history), the output pager, the interpreter (with
//! its alias table) and the keymap. The loop reads one event, handles it to
//! completion, repaints, and reads again until a halt.
//!
//! Screen layout: output rows fill the screen from the top; the last row is
//! the input line.

use std::path::Path;

use dandy_editor::{EditorEvent, InputEvent, KeySource, Keymap, LineEditor, OutputPager, Screen};
use dandy_foundation::Result;

use crate::config::{DEFAULT_PROMPT, ShellConfig};
use crate::interpreter::CommandInterpreter;

/// An interactive shell session.
pub struct Session {
    editor: LineEditor,
    pager: OutputPager,
    interpreter: CommandInterpreter,
    keymap: Keymap,
    prompt: String,
    running: bool,
}

impl Session {
    /// Creates a session sized for a `width` x `height` screen.
    #[must_use]
    pub fn new(interpreter: CommandInterpreter, keymap: Keymap, width: u16, height: u16) -> Self {
        let mut editor = LineEditor::new();
        editor.set_commands(interpreter.command_names());
        Self {
            editor,
            pager: OutputPager::new(width, height.saturating_sub(1)),
            interpreter,
            keymap,
            prompt: DEFAULT_PROMPT.to_string(),
            running: true,
        }
    }

    /// Creates a session from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the keymap or bestiary cannot be loaded.
    pub fn from_config(config: &ShellConfig, width: u16, height: u16) -> Result<Self> {
        let interpreter = config.interpreter()?;
        let keymap = config.keymap()?;
        Ok(Self::new(interpreter, keymap, width, height).with_prompt(config.prompt.clone()))
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns true until a halt is requested.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the line editor.
    #[must_use]
    pub const fn editor(&self) -> &LineEditor {
        &self.editor
    }

    /// Returns the output pager.
    #[must_use]
    pub const fn pager(&self) -> &OutputPager {
        &self.pager
    }

    /// Returns the interpreter.
    #[must_use]
    pub const fn interpreter(&self) -> &CommandInterpreter {
        &self.interpreter
    }

    /// Runs a batch file with the pager silenced.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read. Errors on individual
    /// lines are discarded with the rest of the output.
    pub fn run_startup<S: Screen + ?Sized>(&mut self, path: &Path, screen: &mut S) -> Result<()> {
        self.pager.set_silent(true);
        let result = self
            .interpreter
            .exec_file(path)
            .and_then(|outcome| self.pager.draw(screen, &outcome.text).map(|()| outcome));
        self.pager.set_silent(false);

        let outcome = result?;
        tracing::info!(path = %path.display(), "ran startup file");
        if outcome.halt {
            self.running = false;
        }
        self.editor.set_commands(self.interpreter.command_names());
        Ok(())
    }

    /// Reads and handles events until a halt or the end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or painting the screen fails.
    pub fn run<K, S>(&mut self, input: &mut K, screen: &mut S) -> Result<()>
    where
        K: KeySource + ?Sized,
        S: Screen + ?Sized,
    {
        tracing::info!("session started");
        self.render(screen)?;
        while self.running {
            let Some(event) = input.next_event()? else {
                break;
            };
            self.handle_event(event, screen)?;
        }
        tracing::info!("session ended");
        Ok(())
    }

    /// Handles one input event and repaints.
    ///
    /// # Errors
    ///
    /// Returns an error if painting the screen fails.
    pub fn handle_event<S: Screen + ?Sized>(&mut self, event: InputEvent, screen: &mut S) -> Result<()> {
        match event {
            InputEvent::Key(key) => match self.editor.handle_key(&key, &self.keymap) {
                EditorEvent::Submitted(line) => self.submit(&line, screen)?,
                EditorEvent::Halt => self.running = false,
                EditorEvent::Unrecognized(key) => {
                    self.pager.draw(screen, &format!("unbound key: {}", key.name()))?;
                }
                EditorEvent::Changed | EditorEvent::Ignored => {}
            },
            InputEvent::Paste(text) => self.editor.insert_str(&text),
            InputEvent::Resize { width, height } => {
                self.pager.resize(width, height.saturating_sub(1));
            }
        }
        self.render(screen)
    }

    /// Echoes and interprets a submitted line, drawing its output.
    ///
    /// # Errors
    ///
    /// Returns an error if painting the screen fails. Command errors are
    /// drawn, not returned.
    pub fn submit<S: Screen + ?Sized>(&mut self, line: &str, screen: &mut S) -> Result<()> {
        self.pager.draw(screen, &format!("{}{line}", self.prompt))?;
        match self.interpreter.interpret(line) {
            Ok(outcome) => {
                if !outcome.text.is_empty() {
                    self.pager.draw(screen, &outcome.text)?;
                }
                if outcome.halt {
                    self.running = false;
                }
            }
            Err(error) => {
                tracing::debug!(%error, line, "command failed");
                self.pager.draw(screen, &error.report())?;
            }
        }
        self.editor.set_commands(self.interpreter.command_names());
        Ok(())
    }

    /// Paints the output region and the input row.
    ///
    /// # Errors
    ///
    /// Returns an error if painting the screen fails.
    pub fn render<S: Screen + ?Sized>(&self, screen: &mut S) -> Result<()> {
        let (_, height) = screen.size()?;
        self.pager.render(screen)?;
        self.editor
            .render(screen, height.saturating_sub(1), &self.prompt)?;
        screen.refresh()
    }
}
