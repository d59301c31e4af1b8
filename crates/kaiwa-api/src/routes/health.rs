use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub environment: String,
}

/// GET /health — always 200; a down database is reported, not an error.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.gateway.ping().await {
        Ok(()) => "connected",
        Err(_) => "disconnected",
    };

    Json(HealthResponse {
        status: "ok",
        database,
        environment: state.config.environment.clone(),
    })
}
