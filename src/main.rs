use clap::Parser;
use ledger_mirror::cli::{self, Cli, Commands, DbCommands, TxCommands};
use ledger_mirror::config::{Config, LogFormat};
use ledger_mirror::{create_app, db, startup};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Tx(TxCommands::Diff { tx_id }) => {
            let pool = db::create_pool(&config).await?;
            cli::handle_tx_diff(&config, &pool, tx_id).await
        }
        Commands::Db(DbCommands::Migrate) => cli::handle_db_migrate(&config).await,
        Commands::Db(DbCommands::Seed) => cli::handle_db_seed(&config).await,
        Commands::Config => {
            cli::handle_config_validate(&config)?;
            let pool = db::create_pool(&config).await?;
            let report = startup::validate_environment(&config, &pool).await;
            report.print();
            if !report.is_valid() {
                anyhow::bail!("Configuration validation failed");
            }
            Ok(())
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let pool = db::create_pool(&config).await?;

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    db::seed_statuses(&pool).await?;

    let report = startup::validate_environment(&config, &pool).await;
    if !report.is_valid() {
        for error in &report.errors {
            tracing::warn!("Startup check failed: {}", error);
        }
    }

    let app = create_app(startup::build_state(&config, pool)?);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
