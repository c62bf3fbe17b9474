// Term-weighting model: tokenization, TF-IDF fit and query transform

pub mod stop_words;
pub mod tokenizer;
pub mod vectorizer;

// Re-exports
pub use tokenizer::tokenize;
pub use vectorizer::{SparseVector, VectorModel};
