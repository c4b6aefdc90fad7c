//! Pool creation, bounded connectivity retries, and idempotent schema setup.

use crate::config::{DbConfig, OnExhausted, RetryPolicy};
use crate::error::BootstrapError;
use crate::store::{ensure_schema, ping};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::future::Future;

/// Build the shared pool, wait for the store, and create tables.
///
/// The pool is created lazily, so it exists even if no check succeeds. What happens then is
/// decided by `cfg.retry.on_exhausted`. A schema failure is always an error.
pub async fn initialize(cfg: &DbConfig) -> Result<PgPool, BootstrapError> {
    tracing::info!(url = %cfg.redacted_url(), "connecting to store");
    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(cfg.acquire_timeout)
        .connect_lazy_with(cfg.connect_options());

    match retry_fixed(&cfg.retry, || ping(&pool)).await {
        Ok(attempt) => tracing::info!(database = %cfg.name, attempt, "connected to store"),
        Err(e) => match cfg.retry.on_exhausted {
            OnExhausted::Fail => return Err(e),
            OnExhausted::Proceed => {
                tracing::error!(error = %e, "continuing without a verified store connection")
            }
        },
    }

    ensure_schema(&pool).await.map_err(BootstrapError::Schema)?;
    tracing::info!("tables items and bills verified");
    Ok(pool)
}

/// Run `check` until it succeeds or `policy.attempts` is used up, sleeping `policy.interval`
/// between attempts. Returns the 1-based attempt that succeeded.
pub async fn retry_fixed<F, Fut>(policy: &RetryPolicy, mut check: F) -> Result<u32, BootstrapError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), sqlx::Error>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match check().await {
            Ok(()) => return Ok(attempt),
            Err(e) if attempt >= attempts => {
                return Err(BootstrapError::StoreUnreachable { attempts, last: e });
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    error = %e,
                    retry_in = ?policy.interval,
                    "store not reachable, retrying"
                );
                tokio::time::sleep(policy.interval).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::{Duration, Instant};

    fn policy(attempts: u32) -> RetryPolicy {
        RetryPolicy {
            attempts,
            interval: Duration::from_millis(1),
            on_exhausted: OnExhausted::Fail,
        }
    }

    #[tokio::test]
    async fn succeeds_on_first_reachable_attempt() {
        let calls = AtomicU32::new(0);
        let attempt = retry_fixed(&policy(10), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    Err(sqlx::Error::PoolTimedOut)
                } else {
                    Ok(())
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(attempt, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhaustion_is_a_distinct_error_after_the_bound() {
        let calls = AtomicU32::new(0);
        let err = retry_fixed(&policy(10), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::PoolTimedOut) }
        })
        .await
        .unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 10);
        assert!(matches!(
            err,
            BootstrapError::StoreUnreachable { attempts: 10, .. }
        ));
    }

    #[tokio::test]
    async fn zero_attempts_still_checks_once() {
        let calls = AtomicU32::new(0);
        let _ = retry_fixed(&policy(0), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::PoolTimedOut) }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    /// Nothing listens on port 1 of the loopback interface, so every connect is refused.
    fn unreachable(on_exhausted: OnExhausted) -> DbConfig {
        DbConfig {
            user: "usuario".into(),
            password: "senha123".into(),
            host: "127.0.0.1".into(),
            port: 1,
            name: "database".into(),
            max_connections: 1,
            acquire_timeout: Duration::from_millis(500),
            retry: RetryPolicy {
                attempts: 1,
                interval: Duration::from_millis(1),
                on_exhausted,
            },
        }
    }

    #[tokio::test]
    async fn initialize_fails_when_store_stays_unreachable() {
        let err = initialize(&unreachable(OnExhausted::Fail)).await.unwrap_err();
        assert!(
            matches!(err, BootstrapError::StoreUnreachable { attempts: 1, .. }),
            "got {:?}",
            err
        );
    }

    #[tokio::test]
    async fn initialize_proceeds_to_schema_setup_after_exhaustion() {
        let err = initialize(&unreachable(OnExhausted::Proceed)).await.unwrap_err();
        assert!(matches!(err, BootstrapError::Schema(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn each_check_is_bounded_by_the_acquire_timeout() {
        let mut cfg = unreachable(OnExhausted::Fail);
        cfg.host = "10.255.255.1".into();
        cfg.acquire_timeout = Duration::from_millis(200);
        let started = Instant::now();
        let err = initialize(&cfg).await.unwrap_err();
        assert!(matches!(err, BootstrapError::StoreUnreachable { .. }));
        assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());
    }
}
