//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

impl HealthResponse {
    /// 200 when the database answers, 503 otherwise
    pub fn from_probe(database_connected: bool) -> (StatusCode, Self) {
        let (code, status, database) = if database_connected {
            (StatusCode::OK, "healthy", "connected")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
        };

        (
            code,
            Self {
                status: status.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                database: database.to_string(),
            },
        )
    }
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let connected = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("Health check database probe failed: {}", e);
            false
        }
    };

    let (code, body) = HealthResponse::from_probe(connected);
    (code, Json(body))
}
