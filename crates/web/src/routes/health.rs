//! Health check endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::state::AppState;

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness probe. Checks the database when orders are persisted.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let Some(pool) = state.pool() else {
        return (StatusCode::OK, Json(json!({ "status": "ok", "store": "memory" })));
    };

    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "store": "postgres" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "store": "postgres" })),
            )
        }
    }
}
