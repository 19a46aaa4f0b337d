// Document embedder trait — the seam between corpus handling and the model.
//
// The pipeline only needs these three operations, so any embedding backend
// that can build a vocabulary, run a training pass, and rank neighbours by tag
// can stand in for the built-in Doc2Vec.

use crate::corpus::LabeledDocument;
use crate::error::Result;

/// What a single training pass did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassStats {
    /// Words that survived down-sampling and produced a gradient step
    pub words_trained: usize,
    /// Learning rate used for the pass
    pub alpha: f32,
}

pub trait DocumentEmbedder {
    /// Initialize vocabulary and one vector slot per tag.
    fn build_vocab(&mut self, documents: &[LabeledDocument]) -> Result<()>;

    /// Run one pass over `documents` in the order given. Callers shuffle
    /// between passes.
    fn train(&mut self, documents: &[LabeledDocument]) -> Result<PassStats>;

    /// The `top_n` documents nearest to `tag`, best first, excluding `tag`
    /// itself.
    fn most_similar(&self, tag: &str, top_n: usize) -> Result<Vec<(String, f32)>>;
}
