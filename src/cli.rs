use clap::{Parser, Subcommand};
use sqlx::PgPool;
use uuid::Uuid;

use crate::adapters::{PostgresTransactionStore, RedisDocumentMirror};
use crate::config::Config;
use crate::ports::TransactionStore;

#[derive(Parser)]
#[command(name = "ledger-mirror")]
#[command(about = "Transaction service backed by Postgres with a Redis document mirror", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Transaction inspection commands
    #[command(subcommand)]
    Tx(TxCommands),

    /// Database management commands
    #[command(subcommand)]
    Db(DbCommands),

    /// Configuration validation
    Config,
}

#[derive(Subcommand)]
pub enum TxCommands {
    /// Compare a transaction's relational row with its mirror document
    Diff {
        /// Transaction UUID
        #[arg(value_name = "TX_ID")]
        tx_id: Uuid,
    },
}

#[derive(Subcommand)]
pub enum DbCommands {
    /// Run database migrations
    Migrate,
    /// Insert the canonical statuses if missing
    Seed,
}

/// Reports whether the mirror document matches the relational row. Read-only.
pub async fn handle_tx_diff(config: &Config, pool: &PgPool, tx_id: Uuid) -> anyhow::Result<()> {
    let store = PostgresTransactionStore::new(pool.clone());
    let mirror = RedisDocumentMirror::new(&config.redis_url, config.mirror_key_prefix.clone())?;

    let Some(row) = store.find_by_id(tx_id).await? else {
        anyhow::bail!("Transaction {} not found", tx_id);
    };
    let document = mirror.get(tx_id).await?;

    match document {
        None => println!("✗ Transaction {} has no mirror document", tx_id),
        Some(doc) if doc == row => println!("✓ Transaction {} is in sync", tx_id),
        Some(doc) => {
            println!("✗ Transaction {} differs between stores", tx_id);
            println!("  relational: {}", serde_json::to_string(&row)?);
            println!("  mirror:     {}", serde_json::to_string(&doc)?);
        }
    }

    Ok(())
}

pub async fn handle_db_migrate(config: &Config) -> anyhow::Result<()> {
    let pool = crate::db::create_pool(config).await?;

    tracing::info!("Running database migrations...");
    crate::db::run_migrations(&pool).await?;

    tracing::info!("Database migrations completed");
    println!("✓ Database migrations completed");

    Ok(())
}

pub async fn handle_db_seed(config: &Config) -> anyhow::Result<()> {
    let pool = crate::db::create_pool(config).await?;

    let inserted = crate::db::seed_statuses(&pool).await?;
    println!("✓ Status catalog seeded ({} new)", inserted);

    Ok(())
}

pub fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Validating configuration...");

    println!("Configuration:");
    println!("  Server Port: {}", config.server_port);
    println!("  Database URL: {}", mask_password(&config.database_url));
    println!("  Redis URL: {}", mask_password(&config.redis_url));
    println!("  Mirror Key Prefix: {}", config.mirror_key_prefix);
    println!("  Notification Topic: {}", config.notification_topic);
    println!("  Publish Timeout: {}s", config.publish_timeout_secs);

    tracing::info!("Configuration is valid");
    println!("✓ Configuration is valid");

    Ok(())
}

fn mask_password(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            if let Some(slash_pos) = url[..colon_pos].rfind("//") {
                let prefix = &url[..slash_pos + 2];
                let user = &url[slash_pos + 2..colon_pos];
                let suffix = &url[at_pos..];
                return format!("{}{}:****{}", prefix, user, suffix);
            }
        }
    }
    url.to_string()
}
