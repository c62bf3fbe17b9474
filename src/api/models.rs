use crate::recommender::{ModelStats, RankedResult};
use serde::{Deserialize, Serialize};

/// Recommendation request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendParams {
    #[serde(default)]
    pub ingredients: String, // Comma-separated ingredient list
    pub top_n: Option<usize>,
}

/// Recommendation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub query: String,
    pub results: Vec<RecipeMatch>,
    pub total: usize,
}

/// One ranked recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeMatch {
    pub rank: usize,
    pub name: String,
    pub ingredients: String,
    pub similarity_score: f64,
}

impl RecipeMatch {
    pub fn from_ranked(position: usize, result: RankedResult) -> Self {
        Self {
            rank: position + 1,
            name: result.name,
            ingredients: result.ingredients,
            similarity_score: result.similarity_score,
        }
    }
}

/// System statistics
pub type Stats = ModelStats;

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub corpus: String,
    pub model: String,
}
