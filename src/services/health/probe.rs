//! Database connectivity probe used by the readiness check.
use async_trait::async_trait;
use sqlx::Connection;
use sqlx::postgres::{PgConnection, PgPool};
use thiserror::Error;

pub type ProbeResult = Result<(), ProbeError>;

/// Why the persistence backend could not be reached.
///
/// Note:
/// - Kept independent from `AppError`: the readiness check turns these into data,
///   they never become an HTTP error.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("database not configured")]
    NotConfigured,
    #[error("database round-trip timed out after {0} ms")]
    Timeout(u128),
    #[error("{0}")]
    Db(#[from] sqlx::Error),
}

/// A single round-trip against the persistence backend.
///
/// Implementations must not retry and must not cache; one call = one attempt.
#[async_trait]
pub trait DbProbe: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn ping(&self) -> ProbeResult;
}

#[async_trait]
impl DbProbe for PgPool {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> ProbeResult {
        if self.num_idle() == 0 {
            // acquire() retries the connect until acquire_timeout and reports PoolTimedOut.
            // A single direct attempt surfaces the real error instead.
            let mut conn = PgConnection::connect_with(&self.connect_options()).await?;
            let outcome = sqlx::query("SELECT 1").execute(&mut conn).await;
            if let Err(e) = conn.close().await {
                tracing::debug!(error = %e, "closing readiness connection failed");
            }
            outcome?;
            return Ok(());
        }

        // The PoolConnection guard goes back to the pool when dropped,
        // whether the query fails or the caller's timeout cancels us.
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}

/// Probe used when DATABASE_URL is not set: always reports not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDatabase;

#[async_trait]
impl DbProbe for NoDatabase {
    fn backend_name(&self) -> &'static str {
        "none"
    }

    async fn ping(&self) -> ProbeResult {
        Err(ProbeError::NotConfigured)
    }
}
