use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::dto::{CreateStatusRequest, StatusDto};
use crate::error::AppError;
use crate::handlers::parse_id;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/v1/statuses",
    request_body = CreateStatusRequest,
    responses(
        (status = 201, description = "Status created", body = StatusDto),
        (status = 400, description = "Malformed body or blank name"),
        (status = 409, description = "Status name already exists")
    ),
    tag = "statuses"
)]
pub async fn create_status(
    State(state): State<AppState>,
    payload: Result<Json<CreateStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let status = state.statuses.create(&input.name).await?;
    Ok((StatusCode::CREATED, Json(status)))
}

#[utoipa::path(
    get,
    path = "/v1/statuses/{id}",
    params(("id" = String, Path, description = "Status ID")),
    responses(
        (status = 200, description = "Status found", body = StatusDto),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Status not found")
    ),
    tag = "statuses"
)]
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusDto>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.statuses.get_by_id(id).await?))
}

#[utoipa::path(
    get,
    path = "/v1/statuses",
    responses((status = 200, description = "All statuses", body = [StatusDto])),
    tag = "statuses"
)]
pub async fn list_statuses(State(state): State<AppState>) -> Result<Json<Vec<StatusDto>>, AppError> {
    Ok(Json(state.statuses.get_all().await?))
}

#[cfg(test)]
mod tests {
    use crate::adapters::memory::RecordingNotifier;
    use crate::test_support::{read_json, request, test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_list_seeded_statuses() {
        let app = test_app(Arc::new(RecordingNotifier::default()));

        let response = app.oneshot(request("GET", "/v1/statuses", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let names: Vec<String> = read_json(response)
            .await
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["created", "pending", "completed", "deleted"]);
    }

    #[tokio::test]
    async fn test_create_then_get_status() {
        let app = test_app(Arc::new(RecordingNotifier::default()));

        let response = app
            .clone()
            .oneshot(request("POST", "/v1/statuses", Some(json!({"name": "refunded"}))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = read_json(response).await;

        let uri = format!("/v1/statuses/{}", created["id"].as_str().unwrap());
        let response = app.oneshot(request("GET", &uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["name"], "refunded");
    }

    #[tokio::test]
    async fn test_duplicate_status_is_409() {
        let app = test_app(Arc::new(RecordingNotifier::default()));

        let response = app
            .oneshot(request("POST", "/v1/statuses", Some(json!({"name": "pending"}))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_get_status_with_invalid_id_is_400() {
        let app = test_app(Arc::new(RecordingNotifier::default()));

        let response = app.oneshot(request("GET", "/v1/statuses/42", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
