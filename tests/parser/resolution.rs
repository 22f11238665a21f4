//! Phrase resolution tests.

use dandy_foundation::ErrorKind;
use dandy_parser::{PhraseResolver, PhraseSet, Resolution};
use dandy_parser::tokenizer::InputTokenizer;

fn set(names: &[&str]) -> PhraseSet {
    PhraseSet::from_names(names)
}

// =============================================================================
// Column scan
// =============================================================================

#[test]
fn unique_prefix_resolves() {
    let found = PhraseResolver::resolve("kni", &set(&["knight", "priest"]));
    assert_eq!(found.phrase, "knight");
    assert_eq!(found.remainder, "");
}

#[test]
fn shared_prefix_fails_with_full_remainder() {
    let found = PhraseResolver::resolve("k", &set(&["knight", "kobold"]));
    assert!(!found.is_match());
    assert_eq!(found.remainder, "k");
}

#[test]
fn multi_word_phrases_resolve_word_by_word() {
    let phrases = set(&["dragon knight", "dragon priest", "goblin"]);
    let found = PhraseResolver::resolve("dr kn roll 1d6", &phrases);
    assert_eq!(found.phrase, "dragon knight");
    assert_eq!(found.remainder, "roll 1d6");
}

#[test]
fn whole_phrase_fallback() {
    // The scan stops after "dragon"; only one phrase starts with it.
    let phrases = set(&["dragon knight", "priest"]);
    let found = PhraseResolver::resolve("d roll 1d6", &phrases);
    assert_eq!(found.phrase, "dragon knight");
    assert_eq!(found.remainder, "roll 1d6");
}

#[test]
fn trailing_words_become_remainder() {
    let found = PhraseResolver::resolve("fo baz", &set(&["foo bar"]));
    assert_eq!(found.phrase, "foo bar");
    assert_eq!(found.remainder, "baz");
}

#[test]
fn case_is_ignored_but_registration_kept() {
    let found = PhraseResolver::resolve("KNI", &set(&["Knight"]));
    assert_eq!(found.phrase, "Knight");
}

#[test]
fn commas_break_matching() {
    let phrases = set(&["knight", "priest"]);
    let found = PhraseResolver::resolve("knight, longsword", &phrases);
    assert!(!found.is_match());
    assert_eq!(found.remainder, "knight, longsword");
}

// =============================================================================
// Detailed outcomes
// =============================================================================

#[test]
fn ambiguity_lists_candidates() {
    // Nothing accumulates, so every phrase starts with the empty prefix.
    let tokens = InputTokenizer::tokenize("k");
    match PhraseResolver::resolve_tokens(&tokens, &set(&["knight", "kobold", "priest"])) {
        Resolution::Ambiguous(candidates) => {
            assert_eq!(candidates, vec!["knight", "kobold", "priest"]);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
}

#[test]
fn try_resolve_errors() {
    let phrases = set(&["knight", "kobold"]);
    let err = PhraseResolver::try_resolve("k", &phrases).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AmbiguousMatch { .. }));
    assert_eq!(err.to_string(), "ambiguous: 'k' could be knight, kobold");

    let err = PhraseResolver::try_resolve("zombie", &phrases).unwrap_err();
    assert!(err.is_match_failure());
}
