// Pipeline: load corpus -> build vocabulary -> train -> query.

pub mod train;
pub mod query;
