use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub dependencies: HashMap<String, DependencyStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyStatus {
    Healthy { status: String, latency_ms: u64 },
    Unhealthy { status: String, error: String },
}

impl DependencyStatus {
    fn healthy(start: Instant) -> Self {
        DependencyStatus::Healthy {
            status: "healthy".to_string(),
            latency_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn unhealthy(error: impl ToString) -> Self {
        DependencyStatus::Unhealthy {
            status: "unhealthy".to_string(),
            error: error.to_string(),
        }
    }
}

#[async_trait]
pub trait DependencyChecker: Send + Sync {
    async fn check(&self) -> DependencyStatus;
}

pub struct PostgresChecker {
    pool: sqlx::PgPool,
}

impl PostgresChecker {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DependencyChecker for PostgresChecker {
    async fn check(&self) -> DependencyStatus {
        let start = Instant::now();
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => DependencyStatus::healthy(start),
            Err(e) => DependencyStatus::unhealthy(e),
        }
    }
}

/// Probes the Redis instance backing the document mirror and the topic.
pub struct RedisChecker {
    url: String,
}

impl RedisChecker {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    async fn ping(&self) -> redis::RedisResult<()> {
        let client = redis::Client::open(self.url.as_str())?;
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl DependencyChecker for RedisChecker {
    async fn check(&self) -> DependencyStatus {
        let start = Instant::now();
        match self.ping().await {
            Ok(()) => DependencyStatus::healthy(start),
            Err(e) => DependencyStatus::unhealthy(e),
        }
    }
}

struct Probe {
    name: String,
    critical: bool,
    checker: Arc<dyn DependencyChecker>,
}

/// Registered dependency probes plus process uptime.
#[derive(Clone)]
pub struct HealthMonitor {
    probes: Arc<Vec<Probe>>,
    start_time: Instant,
}

impl HealthMonitor {
    pub fn builder() -> HealthMonitorBuilder {
        HealthMonitorBuilder { probes: Vec::new() }
    }

    pub async fn check_health(&self) -> HealthResponse {
        let results = join_all(self.probes.iter().map(|probe| async move {
            let status = timeout(CHECK_TIMEOUT, probe.checker.check())
                .await
                .unwrap_or_else(|_| DependencyStatus::unhealthy("timeout"));
            (probe, status)
        }))
        .await;

        let mut critical_failure = false;
        let mut non_critical_failure = false;
        let mut dependencies = HashMap::new();

        for (probe, status) in results {
            if matches!(status, DependencyStatus::Unhealthy { .. }) {
                if probe.critical {
                    critical_failure = true;
                } else {
                    non_critical_failure = true;
                }
            }
            dependencies.insert(probe.name.clone(), status);
        }

        let status = if critical_failure {
            "unhealthy"
        } else if non_critical_failure {
            "degraded"
        } else {
            "healthy"
        };

        HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            dependencies,
        }
    }
}

pub struct HealthMonitorBuilder {
    probes: Vec<Probe>,
}

impl HealthMonitorBuilder {
    /// A failing critical probe makes the service unhealthy; any other
    /// failing probe only degrades it.
    pub fn probe(
        mut self,
        name: impl Into<String>,
        critical: bool,
        checker: impl DependencyChecker + 'static,
    ) -> Self {
        self.probes.push(Probe {
            name: name.into(),
            critical,
            checker: Arc::new(checker),
        });
        self
    }

    pub fn build(self) -> HealthMonitor {
        HealthMonitor {
            probes: Arc::new(self.probes),
            start_time: Instant::now(),
        }
    }
}
