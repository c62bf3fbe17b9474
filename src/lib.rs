pub mod config;
pub mod error;

// Recommendation core
pub mod corpus;
pub mod model;
pub mod recommender;

// Presentation
pub mod api;
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use recommender::{RankedResult, Recommender};
