// docsim: similarity search over labeled text documents
//
// This is the library root. Corpus loading and lookup live in `corpus`, the
// paragraph-vector model in `embedding`, and `pipeline` ties them together.

pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod output;
pub mod pipeline;

pub use error::{DocsimError, Result};
