//! Error types for the Dandy shell.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every variant is a local, recoverable condition: the session renders it
//! as a one-line message and keeps running.

use std::fmt;

use thiserror::Error;

/// Result type alias for Dandy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Dandy operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records an expansion the error passed through on its way out.
    ///
    /// Call from the innermost expansion outward; frames are kept in that
    /// order.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Renders the message followed by any context, on one line.
    #[must_use]
    pub fn report(&self) -> String {
        match &self.context {
            Some(context) if !context.is_empty() => format!("{self} {context}"),
            _ => self.to_string(),
        }
    }

    /// Creates a bad dice notation error.
    #[must_use]
    pub fn bad_notation(text: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadNotation(text.into()))
    }

    /// Creates an unknown command error.
    #[must_use]
    pub fn no_such_command(token: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoSuchCommand(token.into()))
    }

    /// Creates a usage error for a builtin command.
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage(message.into()))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Creates an I/O error from a message.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Returns true if this is a failure of the phrase resolver.
    #[must_use]
    pub fn is_match_failure(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::AmbiguousMatch { .. } | ErrorKind::NoMatch(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::io(e.to_string())
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Dice string does not match `<count>d<sides>[+/-<modifier>]`.
    #[error("roll: bad syntax ({0})")]
    BadNotation(String),

    /// Dice with no faces to land on.
    #[error("roll: invalid range: a d{sides} has no faces")]
    InvalidRange {
        /// The requested number of sides.
        sides: u32,
    },

    /// More dice than a single roll allows.
    #[error("roll: too many dice: {count} (limit {limit})")]
    TooManyDice {
        /// The requested dice count.
        count: u32,
        /// The configured ceiling.
        limit: u32,
    },

    /// Leading token names no builtin, alias, or creature.
    #[error("No such command: {0}")]
    NoSuchCommand(String),

    /// The target of `exec` (or a configuration file) is absent.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// More than one phrase fits the input.
    #[error("ambiguous: '{input}' could be {}", .candidates.join(", "))]
    AmbiguousMatch {
        /// The input that was being resolved.
        input: String,
        /// The phrases that fit.
        candidates: Vec<String>,
    },

    /// No phrase fits the input.
    #[error("no match for '{0}'")]
    NoMatch(String),

    /// Alias expansion revisits an alias already being expanded.
    #[error("alias cycle: {}", .0.join(" -> "))]
    AliasCycle(Vec<String>),

    /// Alias, sub-command, or exec nesting exceeded the depth ceiling.
    #[error("expansion too deep (limit {0})")]
    ExpansionTooDeep(usize),

    /// A builtin was called with arguments it cannot use.
    #[error("{0}")]
    Usage(String),

    /// Invalid configuration (key bindings, bestiary, command line).
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file (e.g. the batch file being executed).
    pub source: Option<String>,
    /// Line number in source (1-indexed).
    pub line: Option<usize>,
    /// Expansions the error passed through, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Returns true if there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.stack.is_empty()
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for frame in &self.stack {
            write!(f, "{separator}in {frame}")?;
            separator = " ";
        }
        if let Some(source) = &self.source {
            write!(f, "{separator}at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        Ok(())
    }
}
