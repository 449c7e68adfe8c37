pub mod statuses;
pub mod transactions;

use crate::error::AppError;
use crate::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy or degraded"),
        (status = 503, description = "Service is unhealthy")
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let health_response = state.health.check_health().await;

    let status_code = if health_response.status == "unhealthy" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (status_code, Json(health_response))
}

pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid ID format".to_string()))
}
