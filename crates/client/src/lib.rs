//! # Coldline Client
//!
//! Public entry point: a keypair-JWT authenticated client for executing SQL
//! statements against a cloud warehouse's REST API and materializing its
//! partitioned result sets.
//!
//! This crate contains:
//! - [`Client`], the facade binding configuration, auth, pool, and the
//!   partition-fetch orchestrator together
//! - [`Client::connect`], an environment-variable-driven constructor
//!
//! ## Architecture
//! - Wires `coldline-domain` types through `coldline-core`'s orchestration
//!   logic using `coldline-infra`'s concrete HTTP/auth adapters
//! - The connection pool and retrying executor are constructed lazily, on
//!   the first query a `Client` runs
//!
//! ```no_run
//! # async fn run() -> coldline_domain::Result<()> {
//! use coldline_client::Client;
//!
//! let client = Client::connect()?;
//! let result = client.query("select 1", None, false).await?;
//! # let _ = result;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use coldline_core::RequestExecutor;
use coldline_domain::{ClientConfig, ClientConfigBuilder, Result};
use coldline_infra::{ConnectionPool, RetryingExecutor, TokenCache};
use tokio::sync::OnceCell;

pub use coldline_core::{MaterializedResult, QueryResult, StreamingResult};
pub use coldline_domain::{CellValue, ClientError, Fingerprint, Row, RowSchema, RowType, TypeTag};

/// The keypair-JWT warehouse client.
///
/// Configuration is fixed at construction; the connection pool is the one piece of
/// state built lazily, on the first call to [`Client::query`].
pub struct Client {
    config: ClientConfig,
    tokens: Arc<TokenCache>,
    pool: OnceCell<Arc<ConnectionPool>>,
}

impl Client {
    /// Build a client from an already-validated [`ClientConfig`].
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if the private key PEM in `config`
    /// doesn't parse (the key fingerprint is derived eagerly here, since
    /// every subsequent JWT mint needs it).
    pub fn new(config: ClientConfig) -> Result<Self> {
        let tokens = Arc::new(TokenCache::new(config.clone())?);
        Ok(Self { config, tokens, pool: OnceCell::new() })
    }

    /// Start a [`ClientConfigBuilder`] for the required constructor inputs,
    /// directly, without going through the environment.
    pub fn builder(
        base_uri: impl Into<String>,
        private_key_pem: impl Into<String>,
        organization: impl Into<String>,
        account: impl Into<String>,
        user: impl Into<String>,
        default_warehouse: impl Into<String>,
    ) -> ClientConfigBuilder {
        ClientConfig::builder(base_uri, private_key_pem, organization, account, user, default_warehouse)
    }

    /// Build a client from the process environment: `SNOWFLAKE_URI`,
    /// `SNOWFLAKE_PRIVATE_KEY` (or `SNOWFLAKE_PRIVATE_KEY_PATH`),
    /// `SNOWFLAKE_ORGANIZATION`, `SNOWFLAKE_ACCOUNT`, `SNOWFLAKE_USER`,
    /// `SNOWFLAKE_DEFAULT_WAREHOUSE`. Tunables keep their
    /// defaults; use [`Client::new`] with a builder directly to override
    /// them from code instead of the environment.
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if a required variable is missing
    /// or the loaded configuration fails validation.
    pub fn connect() -> Result<Self> {
        let config = coldline_infra::config::load_from_env()?.build()?;
        Self::new(config)
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute `sql` against `warehouse` (or the configured default
    /// warehouse) and materialize or stream its result set.
    ///
    /// # Errors
    /// Propagates [`ClientError::Connection`], [`ClientError::ConnectionStarved`],
    /// and [`ClientError::BadResponse`] from the underlying request
    /// executor; partial partition failures abort the whole query.
    pub async fn query(&self, sql: &str, warehouse: Option<&str>, streaming: bool) -> Result<QueryResult> {
        let warehouse = warehouse.unwrap_or_else(|| self.config.default_warehouse());
        let pool = self.pool().await?;
        let executor: Arc<dyn RequestExecutor> = Arc::new(RetryingExecutor::new(
            self.config.base_uri().clone(),
            pool,
            self.tokens.clone(),
            self.config.http_retries(),
        ));

        coldline_core::run_query(
            executor,
            sql,
            warehouse,
            streaming,
            self.config.thread_scale_factor(),
            self.config.max_threads_per_query(),
        )
        .await
    }

    async fn pool(&self) -> Result<Arc<ConnectionPool>> {
        self.pool
            .get_or_try_init(|| async {
                ConnectionPool::new(
                    self.config.max_connections(),
                    Duration::from_secs(self.config.connection_timeout_secs()),
                )
                .map(Arc::new)
            })
            .await
            .map(Arc::clone)
    }
}
