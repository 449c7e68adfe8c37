//! Dual-store transaction repository.
//!
//! Postgres is the system of record. Every create and update is written there
//! first and then copied into the document mirror. The two writes are
//! independent round trips: a mirror failure is reported as
//! [`RepositoryError::Replication`] and the relational change stays committed.
//! Delete only touches the relational row.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::transaction::now;
use crate::domain::{Status, StatusName, Transaction};
use crate::ports::{
    DocumentMirror, MirrorError, RepositoryError, RepositoryResult, StatusRepository,
    TransactionRepository, TransactionStore,
};

pub struct DualStoreTransactionRepository {
    statuses: Arc<dyn StatusRepository>,
    store: Arc<dyn TransactionStore>,
    mirror: Arc<dyn DocumentMirror>,
}

impl DualStoreTransactionRepository {
    pub fn new(
        statuses: Arc<dyn StatusRepository>,
        store: Arc<dyn TransactionStore>,
        mirror: Arc<dyn DocumentMirror>,
    ) -> Self {
        Self {
            statuses,
            store,
            mirror,
        }
    }

    /// Looks a status up by name. A miss yields the zero-value status
    /// instead of an error; unknown names are only logged.
    async fn resolve_status(&self, name: &str) -> RepositoryResult<Status> {
        match self.statuses.find_by_name(name).await? {
            Some(status) => Ok(status),
            None => {
                tracing::warn!(status = %name, "Unknown status name, using empty status reference");
                Ok(Status::default())
            }
        }
    }

    fn replication_failed(committed: Transaction, err: MirrorError) -> RepositoryError {
        tracing::warn!(
            transaction_id = %committed.id,
            error = %err,
            "Mirror write failed after relational commit"
        );
        RepositoryError::Replication {
            committed: Box::new(committed),
            reason: err.to_string(),
        }
    }

    async fn load(&self, id: Uuid) -> RepositoryResult<Transaction> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Transaction {} not found", id)))
    }
}

#[async_trait]
impl TransactionRepository for DualStoreTransactionRepository {
    async fn create(&self, value: BigDecimal) -> RepositoryResult<Transaction> {
        let status = self.resolve_status(StatusName::CREATED).await?;
        let mut tx = Transaction::new(value, status);

        tx.id = self.store.insert(&tx).await?;

        if let Err(e) = self.mirror.insert(&tx).await {
            return Err(Self::replication_failed(tx, e));
        }

        tracing::info!(transaction_id = %tx.id, value = %tx.value, "Transaction created");
        Ok(tx)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Transaction> {
        self.load(id).await
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>> {
        self.store.find_all().await
    }

    async fn update(&self, tx: &Transaction) -> RepositoryResult<Transaction> {
        let mut existing = self.load(tx.id).await?;

        existing.status = self.resolve_status(&tx.status.name).await?;
        existing.value = tx.value.clone();
        existing.updated_at = tx.updated_at;

        self.store.save(&existing).await?;

        if let Err(e) = self.mirror.replace(&existing).await {
            return Err(Self::replication_failed(existing, e));
        }

        tracing::info!(
            transaction_id = %existing.id,
            status = %existing.status.name,
            "Transaction updated"
        );
        Ok(existing)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<Transaction> {
        let status = self.resolve_status(StatusName::DELETED).await?;

        let affected = self.store.mark_deleted(id, status.reference(), now()).await?;
        if affected == 0 {
            return Err(RepositoryError::NotFound(format!("Transaction {} not found", id)));
        }

        let deleted = self.load(id).await?;
        tracing::info!(transaction_id = %id, "Transaction soft-deleted");
        Ok(deleted)
    }
}
