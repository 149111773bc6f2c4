pub mod embeddings;
pub mod lexical;
pub mod recommendations;
pub mod safety;
pub mod scoring;
pub mod similarity;

pub use embeddings::EmbeddingStore;
pub use lexical::LexicalIndex;
pub use recommendations::RecommendationEngine;
