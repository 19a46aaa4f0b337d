// Corpus handling: source maps, tokenization, loading, and tag/text lookup.

pub mod loader;
pub mod lookup;
pub mod source;
pub mod tokenize;

pub use loader::{load, LabeledDocument};
pub use lookup::Corpus;
pub use source::SourceMap;
pub use tokenize::StopWords;
