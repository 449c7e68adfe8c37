//! Ports: the seams between the transaction core and its stores.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Status, Transaction};
use crate::dto::TransactionDto;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// The relational write committed but the mirror write did not.
    #[error("Replication of transaction {} failed: {reason}", .committed.id)]
    Replication {
        committed: Box<Transaction>,
        reason: String,
    },
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("row not found".to_string()),
            sqlx::Error::Database(ref db_err)
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                RepositoryError::Conflict(db_err.message().to_string())
            }
            other => RepositoryError::Storage(other.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document {0} already exists")]
    AlreadyExists(Uuid),
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Publish timed out after {0}s")]
    Timeout(u64),
}

/// Status catalog.
#[async_trait]
pub trait StatusRepository: Send + Sync {
    async fn create(&self, name: &str) -> RepositoryResult<Status>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Status>;

    /// A miss is `Ok(None)`; callers decide what an unknown name means.
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Status>>;

    async fn find_all(&self) -> RepositoryResult<Vec<Status>>;
}

/// Authoritative relational rows. Reads never filter on the soft-delete flag.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Inserts the row and returns the identifier the store generated.
    async fn insert(&self, tx: &Transaction) -> RepositoryResult<Uuid>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Transaction>>;

    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>>;

    /// Replaces every column of the row with the given id.
    async fn save(&self, tx: &Transaction) -> RepositoryResult<()>;

    /// Sets the soft-delete markers and status only. Returns rows affected.
    async fn mark_deleted(
        &self,
        id: Uuid,
        status_id: Option<Uuid>,
        deleted_at: DateTime<Utc>,
    ) -> RepositoryResult<u64>;
}

/// Write-only denormalized copy of each transaction.
#[async_trait]
pub trait DocumentMirror: Send + Sync {
    /// Writes a new document; an existing one is an error.
    async fn insert(&self, tx: &Transaction) -> Result<(), MirrorError>;

    /// Writes the document with the same id, creating it if absent.
    async fn replace(&self, tx: &Transaction) -> Result<(), MirrorError>;
}

/// Message topic the HTTP layer announces mutations on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, message: &TransactionDto) -> Result<(), NotifyError>;
}

/// The dual-store transaction repository contract.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn create(&self, value: BigDecimal) -> RepositoryResult<Transaction>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Transaction>;

    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>>;

    /// Uses `tx.id`, `tx.status.name`, `tx.value` and `tx.updated_at`.
    async fn update(&self, tx: &Transaction) -> RepositoryResult<Transaction>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<Transaction>;
}
