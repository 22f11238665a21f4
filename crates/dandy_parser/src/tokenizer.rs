//! Input tokenization.
//!
//! Splits a command line on whitespace. Punctuation is kept inside the
//! token it touches, so `"knight,"` does not match the phrase `"knight"`.

/// A word from player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputToken {
    /// The word as typed.
    pub raw: String,
    /// The word lowercased, for comparison.
    pub word: String,
}

impl InputToken {
    /// Creates a token from typed text.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            word: raw.to_lowercase(),
        }
    }
}

/// Tokenizes player input.
pub struct InputTokenizer;

impl InputTokenizer {
    /// Tokenizes a raw input string into whitespace-delimited tokens.
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<InputToken> {
        input.split_whitespace().map(InputToken::new).collect()
    }

    /// Splits a line into its leading token and the trimmed rest.
    ///
    /// Returns `("", "")` for blank input.
    #[must_use]
    pub fn split_first(line: &str) -> (&str, &str) {
        let line = line.trim();
        match line.find(char::is_whitespace) {
            Some(idx) => (&line[..idx], line[idx..].trim_start()),
            None => (line, ""),
        }
    }

    /// Joins the raw text of tokens with single spaces.
    #[must_use]
    pub fn join(tokens: &[InputToken]) -> String {
        tokens
            .iter()
            .map(|t| t.raw.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
