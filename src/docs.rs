use utoipa::OpenApi;

use crate::dto::{
    CreateStatusRequest, CreateTransactionRequest, StatusDto, TransactionDto,
    UpdateTransactionRequest,
};
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transactions API",
        description = "Transactions recorded in Postgres and mirrored to Redis."
    ),
    paths(
        handlers::health,
        handlers::transactions::create_transaction,
        handlers::transactions::get_transaction,
        handlers::transactions::list_transactions,
        handlers::transactions::update_transaction,
        handlers::transactions::delete_transaction,
        handlers::statuses::create_status,
        handlers::statuses::get_status,
        handlers::statuses::list_statuses,
    ),
    components(schemas(
        TransactionDto,
        StatusDto,
        CreateTransactionRequest,
        UpdateTransactionRequest,
        CreateStatusRequest,
    )),
    tags(
        (name = "transactions", description = "Transaction lifecycle"),
        (name = "statuses", description = "Status catalog"),
        (name = "Health", description = "Dependency health")
    )
)]
pub struct ApiDoc;
