//! Publishes transaction mutations on a Redis pub/sub channel.

use async_trait::async_trait;
use redis::AsyncCommands;
use std::time::Duration;
use tokio::time::timeout;

use crate::dto::TransactionDto;
use crate::ports::{Notifier, NotifyError};

pub const DEFAULT_TOPIC: &str = "transactions";
pub const DEFAULT_PUBLISH_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct RedisNotifier {
    redis_client: redis::Client,
    topic: String,
    deadline: Duration,
}

impl RedisNotifier {
    pub fn new(redis_url: &str, topic: impl Into<String>, deadline_secs: u64) -> anyhow::Result<Self> {
        let redis_client = redis::Client::open(redis_url)?;
        Ok(Self {
            redis_client,
            topic: topic.into(),
            deadline: Duration::from_secs(deadline_secs),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    async fn send(&self, payload: String) -> Result<(), NotifyError> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let receivers: i64 = conn.publish(&self.topic, payload).await?;
        tracing::debug!(topic = %self.topic, receivers, "Notification published");
        Ok(())
    }
}

#[async_trait]
impl Notifier for RedisNotifier {
    /// Single attempt under the configured deadline. No retries.
    async fn publish(&self, message: &TransactionDto) -> Result<(), NotifyError> {
        let payload = serde_json::to_string(message)?;

        timeout(self.deadline, self.send(payload))
            .await
            .map_err(|_| NotifyError::Timeout(self.deadline.as_secs()))?
    }
}
