//! The command interpreter.
//!
//! One submitted line goes through these steps:
//!
//! 1. If the leading token is an alias, its replacement (plus any trailing
//!    arguments) is interpreted instead.
//! 2. Each balanced `( ... )` group is interpreted as a command line of its
//!    own and replaced by its output text. Groups inside a group are
//!    handled while interpreting that group; substituted text is not
//!    scanned again, and a `(` with no closing partner is kept as is. If
//!    any group was replaced, step 1 runs again on the result.
//! 3. The expanded line is dispatched: bare dice notation is rolled; a
//!    builtin name (or a unique prefix of one) runs that builtin; a creature
//!    name followed by one of its macros runs the macro.
//!
//! Alias expansion tracks the chain of aliases being expanded and fails
//! with `AliasCycle` when a name repeats. Alias, group and `exec` nesting
//! share one depth ceiling. An error leaving an alias or group records it
//! as a frame, so batch files can report where a failure came from.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use dandy_dice::{DiceRollSpec, Roller, ToHit};
use dandy_foundation::{Error, ErrorKind, Result};
use dandy_parser::{Bestiary, InputTokenizer, PhraseResolver, PhraseSet};

/// Default ceiling on nested expansion.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// The result of interpreting one line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Text to show, possibly several lines, possibly empty.
    pub text: String,
    /// True if the session should stop.
    pub halt: bool,
}

impl Outcome {
    /// Creates an outcome that only shows text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            halt: false,
        }
    }

    /// Creates an outcome that stops the session.
    #[must_use]
    pub fn halt() -> Self {
        Self {
            text: String::new(),
            halt: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Builtin {
    Roll,
    Hit,
    Echo,
    Alias,
    Unalias,
    Exec,
    Help,
    Halt,
}

const BUILTINS: &[(&str, Builtin)] = &[
    ("roll", Builtin::Roll),
    ("hit", Builtin::Hit),
    ("echo", Builtin::Echo),
    ("alias", Builtin::Alias),
    ("unalias", Builtin::Unalias),
    ("exec", Builtin::Exec),
    ("help", Builtin::Help),
    ("halt", Builtin::Halt),
    ("quit", Builtin::Halt),
    ("exit", Builtin::Halt),
];

fn builtin(name: &str) -> Option<Builtin> {
    BUILTINS
        .iter()
        .find(|(builtin_name, _)| builtin_name.eq_ignore_ascii_case(name))
        .map(|&(_, builtin)| builtin)
}

/// Expands and runs command lines.
#[derive(Debug)]
pub struct CommandInterpreter {
    aliases: BTreeMap<String, String>,
    roller: Roller,
    bestiary: Bestiary,
    max_depth: usize,
    base_dir: PathBuf,
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInterpreter {
    /// Creates an interpreter with an entropy-seeded roller and no creatures.
    #[must_use]
    pub fn new() -> Self {
        Self {
            aliases: BTreeMap::new(),
            roller: Roller::new(),
            bestiary: Bestiary::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Replaces the dice roller.
    #[must_use]
    pub fn with_roller(mut self, roller: Roller) -> Self {
        self.roller = roller;
        self
    }

    /// Replaces the bestiary.
    #[must_use]
    pub fn with_bestiary(mut self, bestiary: Bestiary) -> Self {
        self.bestiary = bestiary;
        self
    }

    /// Sets the expansion depth ceiling.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the directory relative `exec` paths resolve against.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Returns the bestiary.
    #[must_use]
    pub const fn bestiary(&self) -> &Bestiary {
        &self.bestiary
    }

    /// Returns the alias table.
    #[must_use]
    pub const fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    /// Defines or replaces an alias. Names are case-insensitive.
    pub fn define_alias(&mut self, name: &str, expansion: &str) {
        let name = name.to_lowercase();
        tracing::debug!(alias = %name, expansion, "defined alias");
        self.aliases.insert(name, expansion.trim().to_string());
    }

    /// Removes an alias, returning its expansion.
    pub fn remove_alias(&mut self, name: &str) -> Option<String> {
        self.aliases.remove(&name.to_lowercase())
    }

    /// Returns the names offered for tab completion: builtins, then aliases.
    #[must_use]
    pub fn command_names(&self) -> Vec<String> {
        BUILTINS
            .iter()
            .map(|(name, _)| (*name).to_string())
            .chain(self.aliases.keys().cloned())
            .collect()
    }

    /// Interprets one command line.
    ///
    /// # Errors
    ///
    /// Returns any dispatch, expansion, or dice error. None of them leave the
    /// interpreter in a bad state.
    pub fn interpret(&mut self, line: &str) -> Result<Outcome> {
        self.eval(line, 0, &mut Vec::new())
    }

    /// Interprets every line of a file, rendering per-line errors as output.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist, or an I/O error if
    /// it cannot be read.
    pub fn exec_file(&mut self, path: &Path) -> Result<Outcome> {
        self.exec(path, 0, &mut Vec::new())
    }

    fn eval(&mut self, line: &str, depth: usize, chain: &mut Vec<String>) -> Result<Outcome> {
        if depth > self.max_depth {
            return Err(Error::new(ErrorKind::ExpansionTooDeep(self.max_depth)));
        }
        let line = line.trim();

        if let Some(outcome) = self.expand_alias(line, depth, chain)? {
            return Ok(outcome);
        }

        let (expanded, group_halt) = self.expand_groups(line, depth, chain)?;
        let mut outcome = if expanded == line {
            self.dispatch(&expanded, depth, chain)?
        } else if let Some(outcome) = self.expand_alias(&expanded, depth, chain)? {
            outcome
        } else {
            self.dispatch(&expanded, depth, chain)?
        };
        outcome.halt |= group_halt;
        Ok(outcome)
    }

    /// Interprets the alias replacement if the line starts with an alias.
    fn expand_alias(
        &mut self,
        line: &str,
        depth: usize,
        chain: &mut Vec<String>,
    ) -> Result<Option<Outcome>> {
        let (head, rest) = InputTokenizer::split_first(line);
        let name = head.to_lowercase();
        let Some(expansion) = self.aliases.get(&name) else {
            return Ok(None);
        };
        if chain.contains(&name) {
            let mut cycle = chain.clone();
            cycle.push(name);
            return Err(Error::new(ErrorKind::AliasCycle(cycle)));
        }

        let replacement = if rest.is_empty() {
            expansion.clone()
        } else {
            format!("{expansion} {rest}")
        };
        tracing::debug!(alias = %name, %replacement, depth, "expanding alias");

        chain.push(name);
        let result = self.eval(&replacement, depth + 1, chain);
        let name = chain.pop().unwrap_or_default();
        result
            .map(Some)
            .map_err(|e| e.in_frame(format!("alias {name}")))
    }

    /// Replaces each parenthesized group with its output.
    ///
    /// Nested groups are interpreted first, as part of interpreting their
    /// enclosing group. Output text is never scanned for further groups. An
    /// unmatched parenthesis is kept literally.
    fn expand_groups(
        &mut self,
        line: &str,
        depth: usize,
        chain: &mut Vec<String>,
    ) -> Result<(String, bool)> {
        let mut expanded = String::with_capacity(line.len());
        let mut halt = false;
        let mut rest = line;
        while let Some(open) = rest.find('(') {
            let Some(len) = group_len(&rest[open..]) else {
                expanded.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
                continue;
            };
            let inner = &rest[open + 1..open + len - 1];
            tracing::debug!(group = inner, depth, "expanding sub-command");
            let outcome = self
                .eval(inner, depth + 1, chain)
                .map_err(|e| e.in_frame(format!("({inner})")))?;
            halt |= outcome.halt;
            expanded.push_str(&rest[..open]);
            expanded.push_str(&outcome.text);
            rest = &rest[open + len..];
        }
        expanded.push_str(rest);
        Ok((expanded, halt))
    }

    fn dispatch(&mut self, line: &str, depth: usize, chain: &mut Vec<String>) -> Result<Outcome> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Outcome::default());
        }
        if DiceRollSpec::is_notation(line) {
            let roll = self.roller.roll_notation(line)?;
            return Ok(Outcome::text(roll.to_string()));
        }

        let (head, rest) = InputTokenizer::split_first(line);
        if let Some(found) = builtin(head) {
            return self.run_builtin(found, rest, depth, chain);
        }

        let commands: PhraseSet = BUILTINS.iter().map(|(name, _)| *name).collect();
        let command = PhraseResolver::resolve(line, &commands);
        if let Some(found) = builtin(&command.phrase) {
            return self.run_builtin(found, &command.remainder, depth, chain);
        }

        let found = PhraseResolver::resolve(line, &self.bestiary.phrases());
        if let Some(creature) = self.bestiary.get(&found.phrase) {
            let action = PhraseResolver::try_resolve(&found.remainder, &creature.macro_phrases())?;
            let text = creature.perform(&action.phrase, &mut self.roller)?;
            return Ok(Outcome::text(text));
        }

        Err(Error::no_such_command(head))
    }

    fn run_builtin(
        &mut self,
        builtin: Builtin,
        args: &str,
        depth: usize,
        chain: &mut Vec<String>,
    ) -> Result<Outcome> {
        let args = args.trim();
        match builtin {
            Builtin::Roll => {
                if args.is_empty() {
                    return Err(Error::usage("usage: roll <count>d<sides>[+/-<modifier>]"));
                }
                let roll = self.roller.roll_notation(args)?;
                Ok(Outcome::text(roll.to_string()))
            }
            Builtin::Hit => {
                let modifier = if args.is_empty() {
                    0
                } else {
                    args.parse::<i32>()
                        .map_err(|_| Error::usage(format!("hit: not a modifier: {args}")))?
                };
                Ok(Outcome::text(ToHit::roll(&mut self.roller, modifier).to_string()))
            }
            Builtin::Echo => Ok(Outcome::text(args)),
            Builtin::Alias => self.alias(args),
            Builtin::Unalias => {
                if args.is_empty() {
                    return Err(Error::usage("usage: unalias <name>"));
                }
                match self.remove_alias(args) {
                    Some(_) => Ok(Outcome::default()),
                    None => Err(Error::usage(format!("unalias: no alias named {args}"))),
                }
            }
            Builtin::Exec => {
                if args.is_empty() {
                    return Err(Error::usage("usage: exec <path>"));
                }
                let path = self.base_dir.join(args);
                self.exec(&path, depth + 1, chain)
            }
            Builtin::Help => Ok(Outcome::text(self.help())),
            Builtin::Halt => Ok(Outcome::halt()),
        }
    }

    fn alias(&mut self, args: &str) -> Result<Outcome> {
        let (name, expansion) = InputTokenizer::split_first(args);
        if name.is_empty() {
            if self.aliases.is_empty() {
                return Ok(Outcome::text("no aliases defined"));
            }
            let listing = self
                .aliases
                .iter()
                .map(|(name, expansion)| format!("{name} -> {expansion}"))
                .collect::<Vec<_>>()
                .join("\n");
            return Ok(Outcome::text(listing));
        }
        if expansion.is_empty() {
            return match self.aliases.get(&name.to_lowercase()) {
                Some(expansion) => Ok(Outcome::text(format!("{} -> {expansion}", name.to_lowercase()))),
                None => Err(Error::usage(format!("alias: no alias named {name}"))),
            };
        }
        self.define_alias(name, expansion);
        Ok(Outcome::default())
    }

    fn exec(&mut self, path: &Path, depth: usize, chain: &mut Vec<String>) -> Result<Outcome> {
        if depth > self.max_depth {
            return Err(Error::new(ErrorKind::ExpansionTooDeep(self.max_depth)));
        }
        if !path.is_file() {
            return Err(Error::new(ErrorKind::FileNotFound(path.display().to_string())));
        }
        let source = fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), depth, "executing batch file");

        // Nested relative paths resolve against the file being run.
        let previous = self.base_dir.clone();
        if let Some(parent) = path.parent() {
            self.base_dir = parent.to_path_buf();
        }

        let mut text = String::new();
        let mut halt = false;
        for (index, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let rendered = match self.eval(line, depth, chain) {
                Ok(outcome) => {
                    halt = outcome.halt;
                    outcome.text
                }
                Err(mut error) => {
                    let context = error
                        .context
                        .take()
                        .unwrap_or_default()
                        .with_source(path.display().to_string())
                        .with_line(index + 1);
                    let error = error.with_context(context);
                    let report = error.report();
                    tracing::warn!(error = %report, "batch line failed");
                    report
                }
            };
            if !rendered.is_empty() {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&rendered);
            }
            if halt {
                break;
            }
        }

        self.base_dir = previous;
        Ok(Outcome { text, halt })
    }

    fn help(&self) -> String {
        let mut text = String::from("commands: ");
        let names: Vec<&str> = BUILTINS.iter().map(|(name, _)| *name).collect();
        text.push_str(&names.join(", "));
        if !self.aliases.is_empty() {
            let aliases: Vec<&str> = self.aliases.keys().map(String::as_str).collect();
            let _ = write!(text, "\naliases: {}", aliases.join(", "));
        }
        if !self.bestiary.is_empty() {
            let creatures: Vec<&str> = self.bestiary.iter().map(|c| c.name()).collect();
            let _ = write!(text, "\ncreatures: {}", creatures.join(", "));
        }
        text
    }
}

/// Returns the byte length of the group `text` starts with, parentheses
/// included, or `None` if it is never closed.
fn group_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index + 1);
                }
            }
            _ => {}
        }
    }
    None
}
