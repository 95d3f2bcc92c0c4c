// handlers/public/mod.rs - Unauthenticated service endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Practice Information API",
        "version": version,
        "endpoints": {
            "health": "/health (public)",
            "practice_information": "/api/practiceInformation (GET, PUT; session required)",
            "upload": "/api/upload (POST multipart; session required)",
            "templates": "/api/templates[/:title] (GET; session required)",
        }
    }))
}

/// GET /health - liveness plus a store round-trip
pub async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.practice.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ApiError::service_unavailable("database unavailable").into_response()
        }
    }
}
