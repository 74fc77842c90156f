use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

/// A normalized set of word tokens.
///
/// Ordered so that iteration is lexicographic and therefore stable across
/// runs.
pub type TokenSet = BTreeSet<String>;

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9A-Za-z\-]+").expect("word pattern is valid")
});

/// Split `text` into lowercase tokens.
///
/// A token is a maximal run of ASCII letters, digits and hyphens. There is
/// no length filter and no stop-word list; duplicates collapse.
pub fn tokenize(text: &str) -> TokenSet {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}

/// Normalize a single query word the way document membership is tested.
pub fn normalize(word: &str) -> String {
    word.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> TokenSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn case_folds_and_dedupes() {
        assert_eq!(
            tokenize("Foo-Bar 123 foo"),
            set(&["foo-bar", "123", "foo"])
        );
        assert_eq!(tokenize("Apple apple APPLE"), set(&["apple"]));
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn punctuation_splits_runs() {
        assert_eq!(
            tokenize("hello, world! it's e-mail_v2"),
            set(&["hello", "world", "it", "s", "e-mail", "v2"])
        );
    }

    #[test]
    fn non_ascii_never_matches() {
        assert_eq!(tokenize("café naïve"), set(&["caf", "na", "ve"]));
    }

    #[test]
    fn single_characters_are_kept() {
        assert_eq!(tokenize("a - b"), set(&["a", "-", "b"]));
    }

    #[test]
    fn iteration_is_sorted() {
        let tokens: Vec<_> = tokenize("zeta alpha mid").into_iter().collect();
        assert_eq!(tokens, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Banana\n"), "banana");
    }
}
