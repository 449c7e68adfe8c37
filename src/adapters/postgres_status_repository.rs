//! Postgres implementation of the status catalog.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::Status;
use crate::ports::{RepositoryError, RepositoryResult, StatusRepository};

#[derive(Clone)]
pub struct PostgresStatusRepository {
    pool: PgPool,
}

impl PostgresStatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusRepository for PostgresStatusRepository {
    async fn create(&self, name: &str) -> RepositoryResult<Status> {
        let row = sqlx::query_as::<_, StatusRow>(
            "INSERT INTO statuses (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match RepositoryError::from(e) {
            RepositoryError::Conflict(_) => {
                RepositoryError::Conflict(format!("Status '{}' already exists", name))
            }
            other => other,
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Status> {
        let row = sqlx::query_as::<_, StatusRow>("SELECT id, name FROM statuses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        row.map(Status::from)
            .ok_or_else(|| RepositoryError::NotFound(format!("Status {} not found", id)))
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Status>> {
        let row = sqlx::query_as::<_, StatusRow>("SELECT id, name FROM statuses WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        Ok(row.map(Status::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Status>> {
        let rows = sqlx::query_as::<_, StatusRow>("SELECT id, name FROM statuses")
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        Ok(rows.into_iter().map(Status::from).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StatusRow {
    id: Uuid,
    name: String,
}

impl From<StatusRow> for Status {
    fn from(row: StatusRow) -> Self {
        Status::new(row.id, row.name)
    }
}
