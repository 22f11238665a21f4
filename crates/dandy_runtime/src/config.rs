//! Shell configuration and the files it points at.
//!
//! [`ShellConfig`] is assembled from the command line. Key bindings and the
//! bestiary are JSON files:
//!
//! ```json
//! { "ctrl-k": ["cursor", "move_to_end"], "f1": ["session", "halt"] }
//! ```
//!
//! ```json
//! { "Knight": { "str": 16, "dex": 11,
//!               "actions": { "Longsword": [5, "1d8+3", "slashing"] } } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use dandy_dice::Roller;
use dandy_editor::{Component, KeyAction, Keymap};
use dandy_foundation::{Error, ErrorKind, Result};
use dandy_parser::{Ability, Bestiary, Creature, CreatureAction};
use serde::Deserialize;

use crate::interpreter::{CommandInterpreter, DEFAULT_MAX_DEPTH};

/// Prompt shown before the input line.
pub const DEFAULT_PROMPT: &str = " > ";

/// Everything needed to start a shell.
#[derive(Clone, Debug)]
pub struct ShellConfig {
    /// Prompt painted at the start of the input row.
    pub prompt: String,
    /// Fixed RNG seed for reproducible rolls.
    pub seed: Option<u64>,
    /// Key-binding overrides.
    pub keymap_path: Option<PathBuf>,
    /// Creature definitions.
    pub bestiary_path: Option<PathBuf>,
    /// Batch file run silently before the session starts.
    pub startup_path: Option<PathBuf>,
    /// Diagnostic log file. No logging without one.
    pub log_path: Option<PathBuf>,
    /// Ceiling on alias, group, and `exec` nesting.
    pub max_depth: usize,
    /// Run `files` and exit instead of starting a session.
    pub batch: bool,
    /// Batch files named on the command line.
    pub files: Vec<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            seed: None,
            keymap_path: None,
            bestiary_path: None,
            startup_path: None,
            log_path: None,
            max_depth: DEFAULT_MAX_DEPTH,
            batch: false,
            files: Vec::new(),
        }
    }
}

impl ShellConfig {
    /// Builder method to set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder method to fix the RNG seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method to set the key-binding file.
    #[must_use]
    pub fn with_keymap(mut self, path: impl Into<PathBuf>) -> Self {
        self.keymap_path = Some(path.into());
        self
    }

    /// Builder method to set the bestiary file.
    #[must_use]
    pub fn with_bestiary(mut self, path: impl Into<PathBuf>) -> Self {
        self.bestiary_path = Some(path.into());
        self
    }

    /// Builder method to set the startup batch file.
    #[must_use]
    pub fn with_startup(mut self, path: impl Into<PathBuf>) -> Self {
        self.startup_path = Some(path.into());
        self
    }

    /// Builder method to set the log file.
    #[must_use]
    pub fn with_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Builder method to set the expansion ceiling.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder method to enable batch mode.
    #[must_use]
    pub const fn with_batch(mut self, batch: bool) -> Self {
        self.batch = batch;
        self
    }

    /// Builder method to add a batch file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Returns a roller honoring the configured seed.
    #[must_use]
    pub fn roller(&self) -> Roller {
        self.seed.map_or_else(Roller::new, Roller::seeded)
    }

    /// Returns the default bindings overlaid with the key-binding file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or invalid.
    pub fn keymap(&self) -> Result<Keymap> {
        match &self.keymap_path {
            Some(path) => parse_keymap(&read(path)?)
                .map_err(|e| Error::config(format!("{}: {e}", path.display()))),
            None => Ok(Keymap::default()),
        }
    }

    /// Returns the creatures from the bestiary file, or none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or invalid.
    pub fn bestiary(&self) -> Result<Bestiary> {
        match &self.bestiary_path {
            Some(path) => parse_bestiary(&read(path)?)
                .map_err(|e| Error::config(format!("{}: {e}", path.display()))),
            None => Ok(Bestiary::new()),
        }
    }

    /// Builds an interpreter from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the bestiary cannot be loaded.
    pub fn interpreter(&self) -> Result<CommandInterpreter> {
        Ok(CommandInterpreter::new()
            .with_roller(self.roller())
            .with_bestiary(self.bestiary()?)
            .with_max_depth(self.max_depth))
    }
}

fn read(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::new(ErrorKind::FileNotFound(path.display().to_string())));
    }
    Ok(fs::read_to_string(path)?)
}

/// Parses a key-binding file over the default bindings.
///
/// # Errors
///
/// Returns a config error for malformed JSON, unknown keys, components or
/// actions, or an action bound under the wrong component.
pub fn parse_keymap(json: &str) -> Result<Keymap> {
    let entries: BTreeMap<String, (Component, KeyAction)> =
        serde_json::from_str(json).map_err(|e| Error::config(e.to_string()))?;
    let mut keymap = Keymap::default();
    for (key, (component, action)) in entries {
        keymap.bind_named(&key, component, action)?;
    }
    tracing::info!(bindings = keymap.len(), "loaded key bindings");
    Ok(keymap)
}

#[derive(Debug, Deserialize)]
struct CreatureRecord {
    #[serde(rename = "str")]
    strength: Option<i32>,
    #[serde(rename = "dex")]
    dexterity: Option<i32>,
    #[serde(rename = "con")]
    constitution: Option<i32>,
    #[serde(rename = "int")]
    intelligence: Option<i32>,
    #[serde(rename = "wis")]
    wisdom: Option<i32>,
    #[serde(rename = "cha")]
    charisma: Option<i32>,
    #[serde(default)]
    actions: BTreeMap<String, (i32, String, String)>,
}

impl CreatureRecord {
    fn into_creature(self, name: &str) -> Result<Creature> {
        let scores = [
            (Ability::Str, self.strength),
            (Ability::Dex, self.dexterity),
            (Ability::Con, self.constitution),
            (Ability::Int, self.intelligence),
            (Ability::Wis, self.wisdom),
            (Ability::Cha, self.charisma),
        ];
        let mut creature = Creature::new(name);
        for (ability, score) in scores {
            if let Some(score) = score {
                creature = creature.with_ability(ability, score);
            }
        }
        for (action, (bonus, damage, damage_type)) in self.actions {
            let parsed = CreatureAction::new(action.as_str(), bonus, &damage, damage_type)
                .map_err(|e| Error::config(format!("{name} {action}: {e}")))?;
            creature = creature.with_action(parsed);
        }
        Ok(creature)
    }
}

/// Parses a bestiary file.
///
/// # Errors
///
/// Returns a config error for malformed JSON or bad damage notation.
pub fn parse_bestiary(json: &str) -> Result<Bestiary> {
    let records: BTreeMap<String, CreatureRecord> =
        serde_json::from_str(json).map_err(|e| Error::config(e.to_string()))?;
    let mut bestiary = Bestiary::new();
    for (name, record) in records {
        bestiary.insert(record.into_creature(&name)?);
    }
    tracing::info!(creatures = bestiary.len(), "loaded bestiary");
    Ok(bestiary)
}
