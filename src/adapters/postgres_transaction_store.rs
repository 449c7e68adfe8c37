//! Postgres implementation of TransactionStore.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Status, Transaction};
use crate::ports::{RepositoryError, RepositoryResult, TransactionStore};

const SELECT_WITH_STATUS: &str = r#"
    SELECT t.id, t.created_at, t.updated_at, t.deleted_at, t.is_deleted, t.value,
           s.id AS status_id, s.name AS status_name
    FROM transactions t
    LEFT JOIN statuses s ON s.id = t.status_id
"#;

/// Postgres-backed transaction rows.
#[derive(Clone)]
pub struct PostgresTransactionStore {
    pool: PgPool,
}

impl PostgresTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PostgresTransactionStore {
    async fn insert(&self, tx: &Transaction) -> RepositoryResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO transactions (
                created_at, updated_at, deleted_at, is_deleted, status_id, value
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(tx.created_at)
        .bind(tx.updated_at)
        .bind(tx.deleted_at)
        .bind(tx.is_deleted)
        .bind(tx.status.reference())
        .bind(&tx.value)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "{SELECT_WITH_STATUS} WHERE t.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(TransactionRow::into_domain))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "{SELECT_WITH_STATUS} ORDER BY t.created_at, t.id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(rows.into_iter().map(TransactionRow::into_domain).collect())
    }

    async fn save(&self, tx: &Transaction) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET created_at = $2, updated_at = $3, deleted_at = $4,
                is_deleted = $5, status_id = $6, value = $7
            WHERE id = $1
            "#,
        )
        .bind(tx.id)
        .bind(tx.created_at)
        .bind(tx.updated_at)
        .bind(tx.deleted_at)
        .bind(tx.is_deleted)
        .bind(tx.status.reference())
        .bind(&tx.value)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Transaction {} not found", tx.id)));
        }
        Ok(())
    }

    async fn mark_deleted(
        &self,
        id: Uuid,
        status_id: Option<Uuid>,
        deleted_at: DateTime<Utc>,
    ) -> RepositoryResult<u64> {
        let result = sqlx::query(
            "UPDATE transactions SET is_deleted = TRUE, deleted_at = $2, status_id = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(deleted_at)
        .bind(status_id)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result.rows_affected())
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    is_deleted: bool,
    value: BigDecimal,
    status_id: Option<Uuid>,
    status_name: Option<String>,
}

impl TransactionRow {
    fn into_domain(self) -> Transaction {
        let status = match (self.status_id, self.status_name) {
            (Some(id), Some(name)) => Status::new(id, name),
            _ => Status::default(),
        };

        Transaction {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
            is_deleted: self.is_deleted,
            status,
            value: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status_id: Option<Uuid>, status_name: Option<&str>) -> TransactionRow {
        TransactionRow {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
            is_deleted: false,
            value: BigDecimal::from(10),
            status_id,
            status_name: status_name.map(str::to_string),
        }
    }

    #[test]
    fn test_row_with_status_maps_to_resolved_status() {
        let status_id = Uuid::new_v4();
        let tx = row(Some(status_id), Some("pending")).into_domain();
        assert_eq!(tx.status, Status::new(status_id, "pending"));
    }

    #[test]
    fn test_row_without_status_maps_to_zero_value() {
        let tx = row(None, None).into_domain();
        assert_eq!(tx.status, Status::default());
    }
}
