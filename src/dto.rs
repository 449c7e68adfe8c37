//! Wire shapes exposed over HTTP and on the notification topic.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Status, Transaction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TransactionDto {
    pub id: Uuid,
    /// Status name.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = String, example = "100.50")]
    pub value: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    #[schema(value_type = String, example = "100.50")]
    pub value: BigDecimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTransactionRequest {
    pub status: String,
    #[schema(value_type = String, example = "150.00")]
    pub value: BigDecimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStatusRequest {
    pub name: String,
}

impl From<&Transaction> for TransactionDto {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            status: tx.status.name.clone(),
            created_at: tx.created_at,
            updated_at: tx.updated_at,
            value: tx.value.clone(),
        }
    }
}

impl From<Transaction> for TransactionDto {
    fn from(tx: Transaction) -> Self {
        Self::from(&tx)
    }
}

impl From<Status> for StatusDto {
    fn from(status: Status) -> Self {
        Self {
            id: status.id,
            name: status.name,
        }
    }
}
