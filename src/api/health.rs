use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::server::AppState;
use crate::tmdb::{UpstreamRequest, HEALTH_ENDPOINT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    fn healthy(message: &str) -> (StatusCode, Json<Self>) {
        let status = HealthStatus {
            status: "healthy".to_string(),
            message: message.to_string(),
        };
        (StatusCode::OK, Json(status))
    }

    fn error(message: &str) -> (StatusCode, Json<Self>) {
        let status = HealthStatus {
            status: "error".to_string(),
            message: message.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(status))
    }
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    if !state.tmdb.has_api_key() {
        warn!("Health check failed: no TMDB API key configured");
        return HealthStatus::error("TMDB API key is missing");
    }

    match state.tmdb.fetch(&UpstreamRequest::new(HEALTH_ENDPOINT)).await {
        Ok(_) => HealthStatus::healthy("TMDB API connection successful"),
        Err(_) => HealthStatus::error("Cannot connect to TMDB API"),
    }
}
