//! # Health Handler

use axum::Json;
use lib_core::dto::HealthResponse;

/// **Route**: `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        code: 200,
        message: "API is healthy.".to_string(),
    })
}
