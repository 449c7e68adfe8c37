//! Redis-backed document mirror. One JSON document per transaction id.

use async_trait::async_trait;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::domain::Transaction;
use crate::ports::{DocumentMirror, MirrorError};

pub const DEFAULT_KEY_PREFIX: &str = "transactions:";

#[derive(Clone)]
pub struct RedisDocumentMirror {
    redis_client: redis::Client,
    key_prefix: String,
}

impl RedisDocumentMirror {
    pub fn new(redis_url: &str, key_prefix: impl Into<String>) -> anyhow::Result<Self> {
        let redis_client = redis::Client::open(redis_url)?;
        Ok(Self {
            redis_client,
            key_prefix: key_prefix.into(),
        })
    }

    pub fn key(&self, id: Uuid) -> String {
        format!("{}{}", self.key_prefix, id)
    }

    /// Reads a document back. The repository never does this; it exists for
    /// reconciliation tooling.
    pub async fn get(&self, id: Uuid) -> Result<Option<Transaction>, MirrorError> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(self.key(id)).await?;

        raw.map(|doc| serde_json::from_str(&doc))
            .transpose()
            .map_err(MirrorError::from)
    }

    /// `SET key doc [NX]`; returns whether the write happened.
    async fn write(&self, tx: &Transaction, only_if_absent: bool) -> Result<bool, MirrorError> {
        let doc = serde_json::to_string(tx)?;
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(self.key(tx.id)).arg(doc);
        if only_if_absent {
            cmd.arg("NX");
        }
        let reply: Option<String> = cmd.query_async(&mut conn).await?;

        Ok(reply.is_some())
    }
}

#[async_trait]
impl DocumentMirror for RedisDocumentMirror {
    async fn insert(&self, tx: &Transaction) -> Result<(), MirrorError> {
        if !self.write(tx, true).await? {
            return Err(MirrorError::AlreadyExists(tx.id));
        }
        tracing::debug!(transaction_id = %tx.id, "Mirror document inserted");
        Ok(())
    }

    async fn replace(&self, tx: &Transaction) -> Result<(), MirrorError> {
        self.write(tx, false).await?;
        tracing::debug!(transaction_id = %tx.id, "Mirror document written");
        Ok(())
    }
}
