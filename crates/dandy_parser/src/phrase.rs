//! Phrase sets.
//!
//! A [`PhraseSet`] is built fresh for each resolution stage from whatever
//! owns the names at that moment (builtin commands, the bestiary, one
//! creature's macros). The resolver only reads it.

/// A known multi-word name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Phrase {
    /// The name as registered.
    pub text: String,
    /// Lowercased words.
    pub words: Vec<String>,
    /// Lowercased words joined by single spaces.
    pub folded: String,
}

impl Phrase {
    fn new(text: &str) -> Option<Self> {
        let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
        if words.is_empty() {
            return None;
        }
        let folded = words.join(" ");
        Some(Self {
            text: text.trim().to_string(),
            words,
            folded,
        })
    }
}

/// The phrases a single resolution stage may match against.
#[derive(Clone, Debug, Default)]
pub struct PhraseSet {
    phrases: Vec<Phrase>,
}

impl PhraseSet {
    /// Creates an empty phrase set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a phrase set from names. Blank and duplicate names are skipped.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    /// Adds a phrase. Returns false if it was blank or already present.
    pub fn insert(&mut self, name: &str) -> bool {
        let Some(phrase) = Phrase::new(name) else {
            return false;
        };
        if self.phrases.iter().any(|p| p.folded == phrase.folded) {
            return false;
        }
        self.phrases.push(phrase);
        true
    }

    /// Returns the number of phrases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Returns true if there are no phrases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Iterates over the phrases in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Phrase> {
        self.phrases.iter()
    }

    /// Iterates over the registered names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(|p| p.text.as_str())
    }

    /// Returns the word count of the longest phrase.
    #[must_use]
    pub fn width(&self) -> usize {
        self.phrases.iter().map(|p| p.words.len()).max().unwrap_or(0)
    }

    /// Iterates over the words at `column` of every phrase long enough to have one.
    pub fn column(&self, column: usize) -> impl Iterator<Item = &str> {
        self.phrases
            .iter()
            .filter_map(move |p| p.words.get(column).map(String::as_str))
    }

    /// Finds the phrase whose folded form equals `folded`.
    #[must_use]
    pub fn find_exact(&self, folded: &str) -> Option<&Phrase> {
        self.phrases.iter().find(|p| p.folded == folded)
    }

    /// Returns true if a phrase matches `name` ignoring case and spacing.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        Phrase::new(name).is_some_and(|p| self.find_exact(&p.folded).is_some())
    }
}

impl<S: AsRef<str>> FromIterator<S> for PhraseSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}
