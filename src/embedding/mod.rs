// Document embeddings: a paragraph-vector model and nearest-neighbour search.

pub mod doc2vec;
pub mod params;
pub mod similarity;
pub mod traits;
pub mod vocab;

pub use doc2vec::Doc2Vec;
pub use params::{ModelParams, TrainingMode};
pub use traits::{DocumentEmbedder, PassStats};
