use crate::adapters::{
    PostgresStatusRepository, PostgresTransactionStore, RedisDocumentMirror, RedisNotifier,
};
use crate::config::Config;
use crate::health::{HealthMonitor, PostgresChecker, RedisChecker};
use crate::repository::DualStoreTransactionRepository;
use crate::services::{StatusService, TransactionService};
use crate::AppState;
use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// Wires the Postgres and Redis adapters into the application state.
pub fn build_state(config: &Config, pool: PgPool) -> Result<AppState> {
    let statuses = Arc::new(PostgresStatusRepository::new(pool.clone()));
    let store = Arc::new(PostgresTransactionStore::new(pool.clone()));
    let mirror = Arc::new(
        RedisDocumentMirror::new(&config.redis_url, config.mirror_key_prefix.clone())
            .context("Invalid REDIS_URL for document mirror")?,
    );
    let notifier = Arc::new(
        RedisNotifier::new(
            &config.redis_url,
            config.notification_topic.clone(),
            config.publish_timeout_secs,
        )
        .context("Invalid REDIS_URL for notifier")?,
    );

    let repository = DualStoreTransactionRepository::new(statuses.clone(), store, mirror);

    let health = HealthMonitor::builder()
        .probe("postgres", true, PostgresChecker::new(pool))
        .probe("redis", false, RedisChecker::new(config.redis_url.clone()))
        .build();

    Ok(AppState {
        transactions: TransactionService::new(Arc::new(repository)),
        statuses: StatusService::new(statuses),
        notifier,
        health,
    })
}

pub struct ValidationReport {
    pub environment: bool,
    pub database: bool,
    pub redis: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.environment && self.database && self.redis
    }

    pub fn print(&self) {
        println!("\n=== Startup Validation Report ===");
        println!("Environment Variables: {}", status(self.environment));
        println!("Database Connectivity: {}", status(self.database));
        println!("Redis Connectivity:    {}", status(self.redis));

        if !self.errors.is_empty() {
            println!("\nErrors:");
            for error in &self.errors {
                println!("  ❌ {}", error);
            }
        }

        println!("\nOverall Status: {}", if self.is_valid() { "✅ PASS" } else { "❌ FAIL" });
        println!("=================================\n");
    }
}

fn status(ok: bool) -> &'static str {
    if ok { "✅ OK" } else { "❌ FAIL" }
}

pub async fn validate_environment(config: &Config, pool: &PgPool) -> ValidationReport {
    let mut report = ValidationReport {
        environment: true,
        database: true,
        redis: true,
        errors: Vec::new(),
    };

    if let Err(e) = validate_env_vars(config) {
        report.environment = false;
        report.errors.push(format!("Environment: {:#}", e));
    }

    if let Err(e) = validate_database(pool).await {
        report.database = false;
        report.errors.push(format!("Database: {:#}", e));
    }

    if let Err(e) = validate_redis(&config.redis_url).await {
        report.redis = false;
        report.errors.push(format!("Redis: {:#}", e));
    }

    report
}

fn validate_env_vars(config: &Config) -> Result<()> {
    if config.database_url.is_empty() {
        anyhow::bail!("DATABASE_URL is empty");
    }
    if config.redis_url.is_empty() {
        anyhow::bail!("REDIS_URL is empty");
    }
    if config.server_port == 0 {
        anyhow::bail!("SERVER_PORT must be greater than 0");
    }
    if config.notification_topic.trim().is_empty() {
        anyhow::bail!("NOTIFICATION_TOPIC is empty");
    }
    if config.publish_timeout_secs == 0 {
        anyhow::bail!("PUBLISH_TIMEOUT_SECS must be greater than 0");
    }

    url::Url::parse(&config.database_url).context("DATABASE_URL is not a valid URL")?;
    url::Url::parse(&config.redis_url).context("REDIS_URL is not a valid URL")?;

    Ok(())
}

async fn validate_database(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .context("Failed to connect to database")?;

    let statuses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM statuses")
        .fetch_one(pool)
        .await
        .context("Failed to read status catalog")?;

    if statuses == 0 {
        anyhow::bail!("Status catalog is empty");
    }

    Ok(())
}

async fn validate_redis(redis_url: &str) -> Result<()> {
    let client = redis::Client::open(redis_url).context("Invalid Redis URL")?;

    let mut conn = client
        .get_multiplexed_async_connection()
        .await
        .context("Failed to connect to Redis")?;

    redis::cmd("PING")
        .query_async::<_, String>(&mut conn)
        .await
        .context("Redis PING failed")?;

    Ok(())
}
