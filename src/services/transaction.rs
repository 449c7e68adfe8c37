use bigdecimal::BigDecimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::transaction::now;
use crate::domain::Status;
use crate::dto::TransactionDto;
use crate::error::AppError;
use crate::ports::TransactionRepository;

/// Translates between the wire shape and persisted transactions.
#[derive(Clone)]
pub struct TransactionService {
    repository: Arc<dyn TransactionRepository>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, value: BigDecimal) -> Result<TransactionDto, AppError> {
        let tx = self.repository.create(value).await?;
        Ok(tx.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TransactionDto, AppError> {
        let tx = self.repository.find_by_id(id).await?;
        Ok(tx.into())
    }

    pub async fn get_all(&self) -> Result<Vec<TransactionDto>, AppError> {
        let txs = self.repository.find_all().await?;
        Ok(txs.into_iter().map(TransactionDto::from).collect())
    }

    /// Moves a transaction to the named status with a new value. Any name is
    /// accepted, "deleted" included; soft deletion only happens via `delete`.
    pub async fn update(
        &self,
        id: Uuid,
        status: &str,
        value: BigDecimal,
    ) -> Result<TransactionDto, AppError> {
        let mut tx = self.repository.find_by_id(id).await?;
        tx.status = Status::named(status);
        tx.value = value;
        tx.updated_at = now();

        let updated = self.repository.update(&tx).await?;
        Ok(updated.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<TransactionDto, AppError> {
        let tx = self.repository.delete(id).await?;
        Ok(tx.into())
    }
}
