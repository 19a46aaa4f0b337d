// Corpus loader: one labeled document per line of each source file.
//
// Tags are `<prefix>_<line index>` with a 0-based index per file. Blank lines
// still count toward the index and produce a document with no words, so a tag
// always points back at the line it came from.

use std::fs;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::lookup::Corpus;
use super::source::SourceMap;
use super::tokenize::{tokenize, StopWords};
use crate::error::{DocsimError, Result};

/// A tokenized line paired with its tag. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledDocument {
    /// Lowercase, stop-word-filtered tokens in line order
    pub words: Vec<String>,
    /// Unique tag of the form `<prefix>_<line index>`
    pub tag: String,
}

impl LabeledDocument {
    pub fn new(words: Vec<String>, tag: impl Into<String>) -> Self {
        Self {
            words,
            tag: tag.into(),
        }
    }

    /// The filtered tokens joined by single spaces.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// Build the tag for a line.
pub fn make_tag(prefix: &str, line_index: usize) -> String {
    format!("{prefix}_{line_index}")
}

/// Tokenize and tag every line of `text`.
pub fn documents_from_text(
    text: &str,
    prefix: &str,
    stop_words: &StopWords,
) -> Vec<LabeledDocument> {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            LabeledDocument::new(tokenize(line, stop_words), make_tag(prefix, i))
        })
        .collect()
}

/// Read every source in map order and build the corpus.
///
/// Any unreadable file aborts the whole load; no partial corpus is returned.
pub fn load(sources: &SourceMap, stop_words: &StopWords) -> Result<Corpus> {
    let mut documents = Vec::new();

    for source in sources.iter() {
        let text = fs::read_to_string(&source.path).map_err(|e| DocsimError::Io {
            path: source.path.clone(),
            source: e,
        })?;

        let docs = documents_from_text(&text, &source.prefix, stop_words);
        info!(
            path = %source.path.display(),
            prefix = %source.prefix,
            documents = docs.len(),
            "Loaded source"
        );
        documents.extend(docs);
    }

    debug!(total = documents.len(), "Corpus assembled");
    Ok(Corpus::new(documents))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> StopWords {
        StopWords::from_words(["was", "a", "the", "is"])
    }

    #[test]
    fn test_documents_from_text_tags_each_line() {
        let text = "Fang Lizhi was a scientist\nThe weather is nice\n";
        let docs = documents_from_text(text, "P", &stop());
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].tag, "P_0");
        assert_eq!(docs[0].words, vec!["fang", "lizhi", "scientist"]);
        assert_eq!(docs[1].tag, "P_1");
        assert_eq!(docs[1].text(), "weather nice");
    }

    #[test]
    fn test_blank_lines_keep_indices_aligned() {
        let docs = documents_from_text("one\n\nthree", "X", &stop());
        let tags: Vec<&str> = docs.iter().map(|d| d.tag.as_str()).collect();
        assert_eq!(tags, vec!["X_0", "X_1", "X_2"]);
        assert!(docs[1].words.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let docs = documents_from_text("alpha\r\nbeta\r\n", "X", &stop());
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].words, vec!["beta"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let sources = SourceMap::from_pairs([("/definitely/not/here.txt", "X")]).unwrap();
        let err = load(&sources, &stop()).unwrap_err();
        assert!(matches!(err, DocsimError::Io { .. }));
    }
}
