use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{api::models::*, recommender::Recommender, Error, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub settings: crate::config::Settings,
}

/// GET /api/recommend - Rank recipes by ingredient similarity
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>> {
    debug!("Recommend request: {:?}", params);

    let query = params.ingredients.trim();
    if query.is_empty() {
        return Err(Error::Validation(
            "Please enter some ingredients".to_string(),
        ));
    }

    let top_n = params
        .top_n
        .unwrap_or(state.settings.recommender.default_top_n)
        .min(state.settings.recommender.max_top_n);

    let results: Vec<RecipeMatch> = state
        .recommender
        .recommend(query, Some(top_n))
        .into_iter()
        .enumerate()
        .map(|(position, result)| RecipeMatch::from_ranked(position, result))
        .collect();

    Ok(Json(RecommendResponse {
        query: query.to_string(),
        total: results.len(),
        results,
    }))
}

/// GET /api/stats - Get corpus and model statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    debug!("Get stats request");
    Ok(Json(state.recommender.stats()))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    // An empty corpus still serves (every query returns nothing), but is not "ready"
    let corpus_loaded = !state.recommender.corpus().is_empty();
    let model_fitted = state.recommender.model().vocabulary_size() > 0;

    Ok(Json(ReadinessResponse {
        ready: corpus_loaded && model_fitted,
        corpus: if corpus_loaded { "ok" } else { "empty" }.to_string(),
        model: if model_fitted { "ok" } else { "empty" }.to_string(),
    }))
}
