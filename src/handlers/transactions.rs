use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dto::{CreateTransactionRequest, TransactionDto, UpdateTransactionRequest};
use crate::error::AppError;
use crate::handlers::parse_id;
use crate::AppState;

/// Publishes the mutated transaction. Returns false when the topic did not
/// acknowledge; the mutation itself already succeeded.
async fn announce(state: &AppState, dto: &TransactionDto) -> bool {
    match state.notifier.publish(dto).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(transaction_id = %dto.id, error = %e, "Notification publish failed");
            false
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = TransactionDto),
        (status = 202, description = "Transaction created, notification not delivered", body = TransactionDto),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Storage or replication failure")
    ),
    tag = "transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let dto = state.transactions.create(input.value).await?;

    let status = if announce(&state, &dto).await {
        StatusCode::CREATED
    } else {
        StatusCode::ACCEPTED
    };
    Ok((status, Json(dto)).into_response())
}

#[utoipa::path(
    get,
    path = "/v1/transactions/{id}",
    params(("id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction found", body = TransactionDto),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Transaction not found")
    ),
    tag = "transactions"
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionDto>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.transactions.get_by_id(id).await?))
}

#[utoipa::path(
    get,
    path = "/v1/transactions",
    responses(
        (status = 200, description = "All transactions, soft-deleted ones included", body = [TransactionDto]),
        (status = 500, description = "Storage failure")
    ),
    tag = "transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransactionDto>>, AppError> {
    Ok(Json(state.transactions.get_all().await?))
}

#[utoipa::path(
    put,
    path = "/v1/transactions/{id}",
    params(("id" = String, Path, description = "Transaction ID")),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated", body = TransactionDto),
        (status = 202, description = "Transaction updated, notification not delivered", body = TransactionDto),
        (status = 400, description = "Invalid ID format or malformed body"),
        (status = 404, description = "Transaction not found"),
        (status = 500, description = "Storage or replication failure")
    ),
    tag = "transactions"
)]
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTransactionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let dto = state
        .transactions
        .update(id, &input.status, input.value)
        .await?;

    let status = if announce(&state, &dto).await {
        StatusCode::OK
    } else {
        StatusCode::ACCEPTED
    };
    Ok((status, Json(dto)).into_response())
}

#[utoipa::path(
    delete,
    path = "/v1/transactions/{id}",
    params(("id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 204, description = "Transaction soft-deleted"),
        (status = 202, description = "Transaction soft-deleted, notification not delivered", body = TransactionDto),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Transaction not found"),
        (status = 500, description = "Storage failure")
    ),
    tag = "transactions"
)]
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let dto = state.transactions.delete(id).await?;

    if announce(&state, &dto).await {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok((StatusCode::ACCEPTED, Json(dto)).into_response())
    }
}
