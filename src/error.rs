// Error types for corpus loading, lookup, and model queries.
//
// The binary wraps these in anyhow with extra context; library callers can
// match on the variants (tests do).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DocsimError {
    /// Two sources in the same source map share a prefix.
    #[error("Non-unique prefix encountered: {0}")]
    DuplicatePrefix(String),

    /// The same file appears twice in one source map.
    #[error("Source listed more than once: {}", .0.display())]
    DuplicatePath(PathBuf),

    /// A `PATH=PREFIX` source spec that could not be parsed.
    #[error("Invalid source '{0}' (expected PATH=PREFIX)")]
    InvalidSource(String),

    /// A source file could not be opened or read.
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No document's filtered text matches the query.
    #[error("No document matches text: {0:?}")]
    TextNotFound(String),

    /// No document carries the tag.
    #[error("No document tagged {0}")]
    TagNotFound(String),

    /// None of the query's words are in the model vocabulary, so no vector
    /// can be inferred for it.
    #[error("No query word is in the model vocabulary: {0:?}")]
    UnknownWords(String),

    /// Training or querying needs at least one document with known words.
    #[error("Corpus is empty")]
    EmptyCorpus,

    /// The model was queried before its vocabulary was built.
    #[error("Model has no vocabulary yet; call build_vocab first")]
    NotTrained,
}

impl DocsimError {
    /// True for lookup failures: unknown text, tag, or query words.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TextNotFound(_) | Self::TagNotFound(_) | Self::UnknownWords(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DocsimError>;
