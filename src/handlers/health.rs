use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: &'static str,
}

/// GET /health - liveness plus a database round-trip
pub async fn get(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthReport {
                status: "ok",
                timestamp,
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthReport {
                    status: "degraded",
                    timestamp,
                    database: "unavailable",
                }),
            )
        }
    }
}
