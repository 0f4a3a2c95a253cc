// src/handlers/system.rs

use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::error::AppError;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
