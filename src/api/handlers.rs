use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::AppResult, models::Recommendations};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub vibe: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Run one recommendation cycle for the posted vibe
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Recommendations>> {
    tracing::info!(
        vibe_len = request.vibe.len(),
        limit = ?request.limit,
        "Processing recommendation request"
    );

    let recommendations = state
        .recommender
        .recommend(&request.vibe, request.limit)
        .await?;

    Ok(Json(recommendations))
}
