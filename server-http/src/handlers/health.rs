use crate::models::HealthResponse;
use axum::{http::StatusCode, Json};

/// GET /health
pub async fn health_check() -> Result<Json<HealthResponse>, StatusCode> {
    Ok(Json(HealthResponse {
        message: "OK".into(),
    }))
}
