// Similarity queries: text -> tag -> neighbours -> text.

use serde::Serialize;
use tracing::{debug, info};

use crate::corpus::tokenize::tokenize;
use crate::corpus::{Corpus, StopWords};
use crate::embedding::{Doc2Vec, DocumentEmbedder};
use crate::error::{DocsimError, Result};

/// A neighbour of the query document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarDocument {
    pub tag: String,
    /// Filtered text of the neighbour
    pub text: String,
    /// Cosine similarity to the query
    pub score: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// The query as the user typed it
    pub query: String,
    /// Tag the query resolved to, or `None` when its vector was inferred
    pub tag: Option<String>,
    /// Neighbours, best first
    pub matches: Vec<SimilarDocument>,
}

/// Look up `query` in the corpus and return its `top_n` nearest neighbours.
///
/// The query is normalized the same way corpus lines are before lookup.
/// Fails with `TextNotFound` when no document matches.
pub fn similar_to_text<E: DocumentEmbedder>(
    model: &E,
    corpus: &Corpus,
    stop_words: &StopWords,
    query: &str,
    top_n: usize,
) -> Result<QueryResult> {
    let tag = corpus.tag_for_query(query, stop_words)?;
    debug!(query = query, tag = tag, "Resolved query to tag");

    let sims = model.most_similar(tag, top_n)?;
    let matches = resolve(corpus, sims)?;

    info!(tag = tag, matches = matches.len(), "Query answered");
    Ok(QueryResult {
        query: query.to_string(),
        tag: Some(tag.to_string()),
        matches,
    })
}

/// Like [`similar_to_text`], but text missing from the corpus gets an
/// inferred vector instead of an error. Text with no word the model knows
/// (including text made only of stop words) still fails, with `UnknownWords`.
pub fn similar_or_inferred(
    model: &Doc2Vec,
    corpus: &Corpus,
    stop_words: &StopWords,
    query: &str,
    top_n: usize,
    infer_epochs: usize,
) -> Result<QueryResult> {
    match similar_to_text(model, corpus, stop_words, query, top_n) {
        Err(DocsimError::TextNotFound(_)) => {
            info!(query = query, "Query not in corpus, inferring a vector");
            let words = tokenize(query, stop_words);
            let vector = model.infer_vector(&words, infer_epochs)?;
            let sims = model.most_similar_to_vector(&vector, top_n);
            Ok(QueryResult {
                query: query.to_string(),
                tag: None,
                matches: resolve(corpus, sims)?,
            })
        }
        other => other,
    }
}

fn resolve(corpus: &Corpus, sims: Vec<(String, f32)>) -> Result<Vec<SimilarDocument>> {
    sims.into_iter()
        .map(|(tag, score)| {
            let text = corpus.text_for_tag(&tag)?;
            Ok(SimilarDocument { tag, text, score })
        })
        .collect()
}
