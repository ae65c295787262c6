//! Startup connection establishment with retry and backoff.
//!
//! Every external dependency goes through [`connect_with_retry`] before the
//! server binds its listener. Each attempt opens a connection *and* performs a
//! liveness check under a per-attempt timeout; failed attempts are retried after
//! a fixed backoff. Running out of attempts is fatal: there is no degraded-mode
//! startup.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{info, warn};

/// Retry settings shared by all dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Pause between a failed attempt and the next one.
    pub backoff: Duration,
    /// Upper bound for a single connect + liveness check.
    pub attempt_timeout: Duration,
}

impl Default for BootstrapPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Duration::from_secs(2),
            attempt_timeout: Duration::from_secs(5),
        }
    }
}

/// Returned when a dependency never became live.
#[derive(Debug, thiserror::Error)]
#[error("failed to connect to {dependency} after {attempts} attempts: {last_error}")]
pub struct BootstrapError {
    pub dependency: &'static str,
    pub attempts: u32,
    pub last_error: String,
}

/// Runs `connect` until it succeeds or the policy's attempts are used up.
///
/// `connect` must both open the connection and prove it is live (PING,
/// `SELECT 1`, ...). Each invocation is bounded by `policy.attempt_timeout`;
/// a timed-out attempt counts as a failure.
///
/// # Errors
///
/// Returns [`BootstrapError`] carrying the last failure once all attempts failed.
pub async fn connect_with_retry<T, E, F, Fut>(
    dependency: &'static str,
    policy: &BootstrapPolicy,
    mut connect: F,
) -> Result<T, BootstrapError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let attempt_timeout = policy.attempt_timeout;
    let backoff = policy.backoff;
    let strategy = FixedInterval::new(backoff).take(max_attempts as usize - 1);

    let mut attempt = 0u32;

    let result = Retry::start(strategy, || {
        attempt += 1;
        let current = attempt;
        let fut = connect();

        async move {
            let outcome = match tokio::time::timeout(attempt_timeout, fut).await {
                Ok(Ok(handle)) => return Ok(handle),
                Ok(Err(e)) => e.to_string(),
                Err(_) => format!("attempt timed out after {:?}", attempt_timeout),
            };

            if current < max_attempts {
                warn!(
                    dependency,
                    attempt = current,
                    max_attempts,
                    error = %outcome,
                    "Connection failed, retrying in {:?}",
                    backoff
                );
            } else {
                warn!(
                    dependency,
                    attempt = current,
                    max_attempts,
                    error = %outcome,
                    "Connection failed, giving up"
                );
            }

            Err(outcome)
        }
    })
    .await;

    match result {
        Ok(handle) => {
            info!(dependency, attempts = attempt, "Dependency is live");
            Ok(handle)
        }
        Err(last_error) => Err(BootstrapError {
            dependency,
            attempts: attempt,
            last_error,
        }),
    }
}

/// Opens the PostgreSQL pool and checks it with `SELECT 1`.
///
/// # Errors
///
/// Returns [`BootstrapError`] if the database is not reachable within the policy.
pub async fn connect_database(
    database_url: &str,
    max_connections: u32,
    policy: &BootstrapPolicy,
) -> Result<PgPool, BootstrapError> {
    let database_url = database_url.to_owned();
    let acquire_timeout = policy.attempt_timeout;

    connect_with_retry("postgres", policy, move || {
        let database_url = database_url.clone();
        async move {
            let pool = PgPoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(acquire_timeout)
                .connect(&database_url)
                .await?;

            if let Err(e) = sqlx::query("SELECT 1").execute(&pool).await {
                pool.close().await;
                return Err(e);
            }

            Ok::<_, sqlx::Error>(pool)
        }
    })
    .await
}
