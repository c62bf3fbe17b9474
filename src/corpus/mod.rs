// Recipe corpus: loading, filtering and ingredient normalization

pub mod loader;
pub mod models;
pub mod normalize;

// Re-exports
pub use loader::{load_path, try_load_path};
pub use models::{Corpus, LoadStats, NormalizedRecipe, RawRecipeRow, RecipeRecord};
pub use normalize::normalize;
