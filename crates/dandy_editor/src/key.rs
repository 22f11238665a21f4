//! Symbolic keys, the actions they trigger, and the table binding one to
//! the other.
//!
//! Key names are the contract with configuration files: `"enter"`,
//! `"ctrl-a"`, `"f5"`, `"space"`, or a single printable character.

use std::collections::HashMap;
use std::fmt;

use dandy_foundation::{Error, Result};

/// A single keystroke.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character with no modifiers.
    Char(char),
    /// A character chorded with Control, stored lowercase.
    Ctrl(char),
    /// Return / Enter.
    Enter,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Tab.
    Tab,
    /// Escape.
    Esc,
    /// Function key F1..F24.
    Function(u8),
    /// Anything the terminal driver could not name.
    Unknown(String),
}

impl Key {
    /// Returns true for keys that insert themselves into the buffer.
    #[must_use]
    pub fn is_printable(&self) -> bool {
        matches!(self, Self::Char(c) if !c.is_control())
    }

    /// Returns the symbolic name of this key.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Char(' ') => "space".to_string(),
            Self::Char(c) if c.is_control() => format!("u+{:04x}", u32::from(*c)),
            Self::Char(c) => c.to_string(),
            Self::Ctrl(c) => format!("ctrl-{c}"),
            Self::Enter => "enter".to_string(),
            Self::Backspace => "backspace".to_string(),
            Self::Delete => "delete".to_string(),
            Self::Left => "left".to_string(),
            Self::Right => "right".to_string(),
            Self::Home => "home".to_string(),
            Self::End => "end".to_string(),
            Self::Up => "up".to_string(),
            Self::Down => "down".to_string(),
            Self::Tab => "tab".to_string(),
            Self::Esc => "esc".to_string(),
            Self::Function(n) => format!("f{n}"),
            Self::Unknown(name) => name.clone(),
        }
    }

    /// Parses a symbolic key name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        let key = match lower.as_str() {
            "enter" | "return" => Self::Enter,
            "backspace" => Self::Backspace,
            "delete" | "del" => Self::Delete,
            "left" => Self::Left,
            "right" => Self::Right,
            "home" => Self::Home,
            "end" => Self::End,
            "up" => Self::Up,
            "down" => Self::Down,
            "tab" => Self::Tab,
            "esc" | "escape" => Self::Esc,
            "space" => Self::Char(' '),
            other => {
                if let Some(hex) = other.strip_prefix("u+") {
                    return u32::from_str_radix(hex, 16)
                        .ok()
                        .and_then(char::from_u32)
                        .map(Self::Char);
                }
                if let Some(rest) = other.strip_prefix("ctrl-") {
                    return single_char(rest).map(Self::Ctrl);
                }
                if let Some(n) = other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    return (1..=24).contains(&n).then_some(Self::Function(n));
                }
                // Single characters keep their case.
                return single_char(name.trim()).map(Self::Char);
            }
        };
        Some(key)
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// The component an action operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Component {
    /// The input buffer as a whole.
    Editor,
    /// The insertion point.
    Cursor,
    /// Submitted-line recall.
    History,
    /// The interactive loop.
    Session,
}

impl Component {
    /// Returns the configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Cursor => "cursor",
            Self::History => "history",
            Self::Session => "session",
        }
    }
}

/// Everything a bound key can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeyAction {
    /// Hand the buffer to the interpreter.
    Submit,
    /// Delete the character before the cursor.
    DeleteBackward,
    /// Delete the character under the cursor.
    DeleteForward,
    /// Complete the last word to a command name.
    TabComplete,
    /// Move the cursor one character left.
    MoveLeft,
    /// Move the cursor one character right.
    MoveRight,
    /// Move the cursor to the start of the line.
    MoveToStart,
    /// Move the cursor to the end of the line.
    MoveToEnd,
    /// Recall the next older history entry.
    HistoryOlder,
    /// Recall the next newer history entry.
    HistoryNewer,
    /// Stop the session.
    Halt,
}

impl KeyAction {
    /// Every action, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Submit,
        Self::DeleteBackward,
        Self::DeleteForward,
        Self::TabComplete,
        Self::MoveLeft,
        Self::MoveRight,
        Self::MoveToStart,
        Self::MoveToEnd,
        Self::HistoryOlder,
        Self::HistoryNewer,
        Self::Halt,
    ];

    /// Returns the component that owns this action.
    #[must_use]
    pub const fn component(self) -> Component {
        match self {
            Self::Submit | Self::DeleteBackward | Self::DeleteForward | Self::TabComplete => {
                Component::Editor
            }
            Self::MoveLeft | Self::MoveRight | Self::MoveToStart | Self::MoveToEnd => {
                Component::Cursor
            }
            Self::HistoryOlder | Self::HistoryNewer => Component::History,
            Self::Halt => Component::Session,
        }
    }

    /// Returns the configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::DeleteBackward => "delete_backward",
            Self::DeleteForward => "delete_forward",
            Self::TabComplete => "tab_complete",
            Self::MoveLeft => "move_left",
            Self::MoveRight => "move_right",
            Self::MoveToStart => "move_to_start",
            Self::MoveToEnd => "move_to_end",
            Self::HistoryOlder => "history_older",
            Self::HistoryNewer => "history_newer",
            Self::Halt => "halt",
        }
    }

    /// Parses a configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

/// Built-in bindings, by key name.
const DEFAULT_BINDINGS: &[(&str, KeyAction)] = &[
    ("enter", KeyAction::Submit),
    ("ctrl-m", KeyAction::Submit),
    ("backspace", KeyAction::DeleteBackward),
    ("ctrl-h", KeyAction::DeleteBackward),
    ("delete", KeyAction::DeleteForward),
    ("tab", KeyAction::TabComplete),
    ("left", KeyAction::MoveLeft),
    ("ctrl-b", KeyAction::MoveLeft),
    ("right", KeyAction::MoveRight),
    ("ctrl-f", KeyAction::MoveRight),
    ("home", KeyAction::MoveToStart),
    ("ctrl-a", KeyAction::MoveToStart),
    ("end", KeyAction::MoveToEnd),
    ("ctrl-e", KeyAction::MoveToEnd),
    ("up", KeyAction::HistoryOlder),
    ("ctrl-p", KeyAction::HistoryOlder),
    ("down", KeyAction::HistoryNewer),
    ("ctrl-n", KeyAction::HistoryNewer),
    ("ctrl-c", KeyAction::Halt),
    ("ctrl-d", KeyAction::Halt),
];

/// Maps keys to actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<Key, KeyAction>,
}

impl Keymap {
    /// Creates a keymap with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds a key, replacing any previous binding.
    pub fn bind(&mut self, key: Key, action: KeyAction) {
        self.bindings.insert(key, action);
    }

    /// Removes a binding. Returns the action it had.
    pub fn unbind(&mut self, key: &Key) -> Option<KeyAction> {
        self.bindings.remove(key)
    }

    /// Binds a key from configuration, checking that the action belongs to
    /// the named component.
    ///
    /// # Errors
    ///
    /// Returns a config error for an unknown key name or a component
    /// mismatch.
    pub fn bind_named(
        &mut self,
        key_name: &str,
        component: Component,
        action: KeyAction,
    ) -> Result<()> {
        let key = Key::from_name(key_name)
            .ok_or_else(|| Error::config(format!("unknown key name '{key_name}'")))?;
        if action.component() != component {
            return Err(Error::config(format!(
                "'{}' is a {} action, not {}",
                action.name(),
                action.component().name(),
                component.name()
            )));
        }
        tracing::debug!(key = %key, action = action.name(), "bound key");
        self.bind(key, action);
        Ok(())
    }

    /// Looks up the action bound to a key.
    #[must_use]
    pub fn lookup(&self, key: &Key) -> Option<KeyAction> {
        self.bindings.get(key).copied()
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Self::empty();
        for (name, action) in DEFAULT_BINDINGS {
            if let Some(key) = Key::from_name(name) {
                keymap.bind(key, *action);
            }
        }
        keymap
    }
}
