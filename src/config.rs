use dotenvy::dotenv;
use std::env;

use crate::adapters::redis_document_mirror::DEFAULT_KEY_PREFIX;
use crate::adapters::redis_notifier::{DEFAULT_PUBLISH_TIMEOUT_SECS, DEFAULT_TOPIC};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: String,
    pub mirror_key_prefix: String,
    pub notification_topic: String,
    pub publish_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            mirror_key_prefix: env::var("MIRROR_KEY_PREFIX")
                .unwrap_or_else(|_| DEFAULT_KEY_PREFIX.to_string()),
            notification_topic: env::var("NOTIFICATION_TOPIC")
                .unwrap_or_else(|_| DEFAULT_TOPIC.to_string()),
            publish_timeout_secs: env::var("PUBLISH_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_PUBLISH_TIMEOUT_SECS.to_string())
                .parse()?,
            log_format: parse_log_format(&env::var("LOG_FORMAT").unwrap_or_default())?,
        })
    }
}

fn parse_log_format(raw: &str) -> anyhow::Result<LogFormat> {
    match raw.trim().to_lowercase().as_str() {
        "" | "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", other),
    }
}
