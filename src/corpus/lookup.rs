// The loaded corpus and its tag <-> text lookups.
//
// The corpus is built once and passed around by reference. Text lookups scan
// in corpus order (first match wins); tag lookups go through an index.

use std::collections::HashMap;

use super::loader::LabeledDocument;
use super::tokenize::{normalize, StopWords};
use crate::error::{DocsimError, Result};

/// All labeled documents in source-map order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<LabeledDocument>,
    by_tag: HashMap<String, usize>,
}

impl Corpus {
    /// Wrap a document list. If a tag repeats, the first document keeps it.
    pub fn new(documents: Vec<LabeledDocument>) -> Self {
        let mut by_tag = HashMap::with_capacity(documents.len());
        for (i, doc) in documents.iter().enumerate() {
            by_tag.entry(doc.tag.clone()).or_insert(i);
        }
        Self { documents, by_tag }
    }

    pub fn documents(&self) -> &[LabeledDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, tag: &str) -> Option<&LabeledDocument> {
        self.by_tag.get(tag).map(|&i| &self.documents[i])
    }

    /// Tag of the first document whose joined tokens equal `text` exactly.
    ///
    /// `text` must already be in filtered form; see [`Corpus::tag_for_query`].
    pub fn tag_for_text(&self, text: &str) -> Result<&str> {
        self.documents
            .iter()
            .find(|doc| doc.text() == text)
            .map(|doc| doc.tag.as_str())
            .ok_or_else(|| DocsimError::TextNotFound(text.to_string()))
    }

    /// Joined tokens of the document carrying `tag`.
    pub fn text_for_tag(&self, tag: &str) -> Result<String> {
        self.get(tag)
            .map(LabeledDocument::text)
            .ok_or_else(|| DocsimError::TagNotFound(tag.to_string()))
    }

    /// Normalize raw query text the way lines are normalized, then look it up.
    pub fn tag_for_query(&self, query: &str, stop_words: &StopWords) -> Result<&str> {
        let normalized = normalize(query, stop_words);
        self.tag_for_text(&normalized)
            .map_err(|_| DocsimError::TextNotFound(query.to_string()))
    }
}
