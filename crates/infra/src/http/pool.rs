//! Bounded connection pool.
//!
//! A real persistent-socket pool isn't reinvented here: reqwest already
//! keeps a per-host hyper connection pool internally. What this type adds
//! on top is the *bound* — a semaphore limiting concurrent in-flight
//! requests to `max_connections`, with a checkout timeout that surfaces as
//! [`ClientError::ConnectionStarved`], exactly the observable contract
//! keeping request concurrency within the configured limit.

use std::time::Duration;

use coldline_domain::{ClientError, Result};
use reqwest::Client;
use tokio::sync::Semaphore;
use std::sync::Arc;

/// A connection checked out of the pool: a cloned `reqwest::Client` handle
/// (cheap — it's an `Arc` internally) held for the duration of one request.
pub struct PooledConnection {
    client: Client,
}

impl PooledConnection {
    /// The underlying HTTP client to issue a request with.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Bounded pool of `max_connections` concurrent requests against the
/// Service, lazily constructed on first use.
pub struct ConnectionPool {
    client: Client,
    semaphore: Arc<Semaphore>,
    checkout_timeout: Duration,
}

impl ConnectionPool {
    /// Build a pool. `checkout_timeout` governs how long `with` waits for a
    /// permit before failing with [`ClientError::ConnectionStarved`].
    pub fn new(max_connections: usize, checkout_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, semaphore: Arc::new(Semaphore::new(max_connections.max(1))), checkout_timeout })
    }

    /// Acquire a connection, run `f` with it, and release the permit on
    /// every exit path (success, `Err`, or panic unwinding through `f`).
    pub async fn with<F, Fut, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(PooledConnection) -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let permit = tokio::time::timeout(self.checkout_timeout, self.semaphore.clone().acquire_owned())
            .await
            .map_err(|_| ClientError::ConnectionStarved { timeout_secs: self.checkout_timeout.as_secs() })?
            .map_err(|_| ClientError::Connection("connection pool semaphore closed".to_string()))?;

        let conn = PooledConnection { client: self.client.clone() };
        let result = f(conn).await;
        drop(permit);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    #[tokio::test]
    async fn checkout_times_out_when_pool_is_exhausted() {
        let pool = Arc::new(ConnectionPool::new(1, Duration::from_millis(50)).unwrap());

        let holder_pool = pool.clone();
        let holder = tokio::spawn(async move {
            holder_pool
                .with(|_conn| async move {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    Ok(())
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        let contender: Result<()> = pool.with(|_conn| async move { Ok(()) }).await;
        assert!(matches!(contender, Err(ClientError::ConnectionStarved { .. })));

        holder.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn permit_is_released_after_successful_use() {
        let pool = ConnectionPool::new(1, Duration::from_secs(1)).unwrap();
        let start = Instant::now();
        pool.with(|_conn| async move { Ok(()) }).await.unwrap();
        pool.with(|_conn| async move { Ok(()) }).await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn permit_is_released_even_when_the_closure_errors() {
        let pool = ConnectionPool::new(1, Duration::from_millis(200)).unwrap();
        let attempts = AtomicUsize::new(0);

        let first: Result<()> = pool
            .with(|_conn| async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::Connection("boom".to_string()))
            })
            .await;
        assert!(first.is_err());

        // If the permit leaked, this second checkout would time out.
        pool.with(|_conn| async move { Ok(()) }).await.unwrap();
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
