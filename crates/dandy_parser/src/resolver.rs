//! Two-stage phrase resolution.
//!
//! Stage one scans column by column: input token `i` is compared against
//! word `i` of every phrase, and a phrase word is accepted when the token is
//! a prefix of it. A column with exactly one distinct accepted word extends
//! the match; any other column ends the scan.
//!
//! Stage two runs when the accumulated words are not themselves a phrase: if
//! exactly one phrase starts with the accumulated text, that phrase wins.
//! Otherwise resolution fails and the whole input is handed back.
//!
//! Tokens are split on whitespace only, so punctuation stuck to a word
//! (`"knight,"`) stops it matching.

use std::collections::BTreeSet;

use dandy_foundation::{Error, ErrorKind, Result};

use crate::phrase::PhraseSet;
use crate::tokenizer::{InputToken, InputTokenizer};

/// A resolved phrase and the input left over after it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PhraseMatch {
    /// The matched phrase as registered, or empty when nothing matched.
    pub phrase: String,
    /// Unconsumed trailing input.
    pub remainder: String,
}

impl PhraseMatch {
    /// Returns true if a phrase was matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        !self.phrase.is_empty()
    }
}

/// The detailed outcome of a resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one phrase fits.
    Matched(PhraseMatch),
    /// Several phrases start with the accumulated text.
    Ambiguous(Vec<String>),
    /// No phrase starts with the accumulated text.
    NoMatch,
}

/// Resolves typed input against a [`PhraseSet`].
pub struct PhraseResolver;

impl PhraseResolver {
    /// Resolves input, returning an empty phrase and the full input on failure.
    #[must_use]
    pub fn resolve(input: &str, phrases: &PhraseSet) -> PhraseMatch {
        match Self::resolve_tokens(&InputTokenizer::tokenize(input), phrases) {
            Resolution::Matched(found) => found,
            Resolution::Ambiguous(_) | Resolution::NoMatch => PhraseMatch {
                phrase: String::new(),
                remainder: input.trim().to_string(),
            },
        }
    }

    /// Resolves input, reporting why resolution failed.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousMatch` or `NoMatch`.
    pub fn try_resolve(input: &str, phrases: &PhraseSet) -> Result<PhraseMatch> {
        match Self::resolve_tokens(&InputTokenizer::tokenize(input), phrases) {
            Resolution::Matched(found) => Ok(found),
            Resolution::Ambiguous(candidates) => Err(Error::new(ErrorKind::AmbiguousMatch {
                input: input.trim().to_string(),
                candidates,
            })),
            Resolution::NoMatch => Err(Error::new(ErrorKind::NoMatch(input.trim().to_string()))),
        }
    }

    /// Resolves pre-tokenized input.
    #[must_use]
    pub fn resolve_tokens(tokens: &[InputToken], phrases: &PhraseSet) -> Resolution {
        let mut accumulated: Vec<&str> = Vec::new();

        for (column, token) in tokens.iter().enumerate().take(phrases.width()) {
            let accepted: BTreeSet<&str> = phrases
                .column(column)
                .filter(|word| word.starts_with(token.word.as_str()))
                .collect();
            let mut accepted = accepted.into_iter();
            match (accepted.next(), accepted.next()) {
                (Some(word), None) => accumulated.push(word),
                _ => break,
            }
        }

        let folded = accumulated.join(" ");
        let remainder = InputTokenizer::join(&tokens[accumulated.len()..]);

        if let Some(phrase) = phrases.find_exact(&folded) {
            return Resolution::Matched(PhraseMatch {
                phrase: phrase.text.clone(),
                remainder,
            });
        }

        let prefixed: Vec<&str> = phrases
            .iter()
            .filter(|p| p.folded.starts_with(&folded))
            .map(|p| p.text.as_str())
            .collect();

        match prefixed.as_slice() {
            [only] => Resolution::Matched(PhraseMatch {
                phrase: (*only).to_string(),
                remainder,
            }),
            [] => Resolution::NoMatch,
            many => {
                tracing::trace!(input = %folded, candidates = many.len(), "ambiguous phrase");
                Resolution::Ambiguous(many.iter().map(ToString::to_string).collect())
            }
        }
    }
}
