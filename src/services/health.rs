//! Health Service
//!
//! Reports whether the directory store is reachable and how long a round trip
//! takes.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::services::store::DirectoryStore;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseHealth {
    pub status: HealthStatus,
    /// Round trip of a trivial query in milliseconds
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemHealth {
    pub status: HealthStatus,
    pub database: DatabaseHealth,
    pub checked_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct HealthService {
    store: Arc<dyn DirectoryStore>,
}

impl HealthService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    pub async fn check_health(&self) -> SystemHealth {
        let database = self.check_database().await;
        SystemHealth {
            status: database.status,
            database,
            checked_at: Utc::now(),
        }
    }

    pub async fn check_database(&self) -> DatabaseHealth {
        let start = Instant::now();
        let result = self.store.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => DatabaseHealth {
                status: HealthStatus::Healthy,
                latency_ms,
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                DatabaseHealth {
                    status: HealthStatus::Unhealthy,
                    latency_ms,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
