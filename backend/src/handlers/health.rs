//! Liveness and health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::ml::ModelSummary;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub model: ModelSummary,
}

/// Plain-text liveness string
pub async fn root() -> &'static str {
    "🌱 AgriVerse Crop-Prediction API (v2) running"
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        model: state.model.as_ref().clone(),
    })
}
