// Line tokenization: lowercase, split on whitespace, drop stop words.
//
// Punctuation is left attached to tokens ("scientist." and "scientist" are
// different words). Queries go through the same function so that lookups
// compare like with like.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// A set of words excluded from every tokenized document.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The English list shipped with the `stop-words` crate.
    pub fn english() -> Self {
        let words: Vec<String> = get(LANGUAGE::English);
        Self::from_words(words)
    }

    /// Build a set from an explicit list. Words are lowercased so they match
    /// lowercased tokens.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// An empty set; every token is kept.
    pub fn none() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

/// Tokenize one line of text into lowercase, stop-word-filtered tokens.
pub fn tokenize(line: &str, stop_words: &StopWords) -> Vec<String> {
    line.to_lowercase()
        .split_whitespace()
        .filter(|w| !stop_words.contains(w))
        .map(str::to_string)
        .collect()
}

/// Normalize free text into the joined form stored for each document.
pub fn normalize(text: &str, stop_words: &StopWords) -> String {
    tokenize(text, stop_words).join(" ")
}
