//! Port interfaces between the orchestrator and its infrastructure adapters.
//!
//! These traits define the boundary `coldline-core` never crosses: no
//! concrete HTTP client, JWT library, or connection pool is named here,
//! only the shapes `coldline-infra` must provide.

use async_trait::async_trait;
use coldline_domain::Result;

/// HTTP method for a request dispatched through a [`RequestExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A successful (status 200) response from the Service.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub body: String,
}

/// Executes one logical request against the Service: attaches auth headers,
/// retries retryable status codes, and returns the parsed-ready body of the
/// first terminal success.
///
/// Implemented by `coldline_infra::http::executor::RetryingExecutor`, which
/// owns the connection pool and token cache this trait's callers never see.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Dispatch `method path` with an optional JSON body, retrying per the
    /// Service's retryable status-code set. `path` is relative to the
    /// client's base URI (e.g. `/api/v2/statements?requestId=...`).
    async fn execute(&self, method: HttpMethod, path: &str, body: Option<String>) -> Result<RawResponse>;
}

/// Supplies a valid bearer token on demand.
///
/// Implemented by `coldline_infra::auth::token_cache::TokenCache`. Exists as
/// a port mainly so the orchestrator's tests can supply a fixed or
/// fault-injecting token source without pulling in RSA/JWT machinery.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// The current bearer token, minting a fresh one if the cached token has
    /// expired.
    async fn current_token(&self) -> Result<String>;
}
