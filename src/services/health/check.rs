/*
 * Responsibility
 * - liveness: "the process is up", independent of any dependency
 * - readiness: one fresh round-trip against the database, bounded by a timeout
 * - failures become HealthStatus::Unhealthy (data), never an error or a panic
 */
use std::time::Duration;

use super::probe::{DbProbe, ProbeError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy { message: String },
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Healthy => None,
            Self::Unhealthy { message } => Some(message),
        }
    }
}

pub fn check_liveness() -> HealthStatus {
    HealthStatus::Healthy
}

pub async fn check_readiness(probe: &dyn DbProbe, timeout: Duration) -> HealthStatus {
    let outcome = match tokio::time::timeout(timeout, probe.ping()).await {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Timeout(timeout.as_millis())),
    };

    match outcome {
        Ok(()) => HealthStatus::Healthy,
        Err(e) => {
            tracing::warn!(backend = probe.backend_name(), error = %e, "readiness probe failed");

            let mut message = e.to_string();
            if message.is_empty() {
                message = "database unreachable".to_string();
            }
            HealthStatus::Unhealthy { message }
        }
    }
}
