// Source maps: which file each document came from, and the prefix its tags carry.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{DocsimError, Result};

/// One input file and the tag prefix for its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub prefix: String,
}

impl Source {
    pub fn new(path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            prefix: prefix.into(),
        }
    }
}

impl FromStr for Source {
    type Err = DocsimError;

    /// Parse `PATH=PREFIX`. The split is on the last `=` so paths may contain one.
    fn from_str(s: &str) -> Result<Self> {
        match s.rsplit_once('=') {
            Some((path, prefix)) if !path.is_empty() && !prefix.is_empty() => {
                Ok(Self::new(path, prefix))
            }
            _ => Err(DocsimError::InvalidSource(s.to_string())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.path.display(), self.prefix)
    }
}

/// Ordered list of sources with unique prefixes and unique paths.
///
/// Order matters: the corpus concatenates documents in the order sources
/// were given.
#[derive(Debug, Clone)]
pub struct SourceMap {
    sources: Vec<Source>,
}

impl SourceMap {
    /// Build a source map, rejecting any repeated prefix or path.
    pub fn new(sources: Vec<Source>) -> Result<Self> {
        let mut prefixes = HashSet::new();
        let mut paths: HashSet<&Path> = HashSet::new();
        for source in &sources {
            if !prefixes.insert(source.prefix.as_str()) {
                return Err(DocsimError::DuplicatePrefix(source.prefix.clone()));
            }
            if !paths.insert(source.path.as_path()) {
                return Err(DocsimError::DuplicatePath(source.path.clone()));
            }
        }
        Ok(Self { sources })
    }

    /// Convenience constructor from `(path, prefix)` pairs.
    pub fn from_pairs<P, S>(pairs: impl IntoIterator<Item = (P, S)>) -> Result<Self>
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(path, prefix)| Source::new(path, prefix))
                .collect(),
        )
    }

    /// The blocked / non-blocked training pair in the working directory.
    pub fn default_training() -> Self {
        Self {
            sources: vec![
                Source::new("train-blocked.txt", "TRAIN_BL"),
                Source::new("train-nonblocked.txt", "TRAIN_NBL"),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

}
