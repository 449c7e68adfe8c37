use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;
use crate::domain::StatusName;

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Inserts the canonical statuses that are not there yet. Returns how many
/// rows were added.
pub async fn seed_statuses(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for name in StatusName::ALL {
        let result = sqlx::query("INSERT INTO statuses (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
        inserted += result.rows_affected();
    }

    tracing::info!(inserted, "Status catalog seeded");
    Ok(inserted)
}
