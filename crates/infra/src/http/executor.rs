//! The retrying request executor.
//!
//! A bounded `for attempt in 0..=retries` loop around one dispatch,
//! logging each retry at `info!`. Retries the Service's own idiosyncratic
//! status-code set and re-evaluates the bearer token on every attempt, so
//! a 403 from a token that expired mid-flight heals on the next try.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use coldline_core::{HttpMethod, RawResponse, RequestExecutor, TokenProvider};
use coldline_domain::{ClientError, Result};
use reqwest::Method;
use tracing::{debug, info};
use url::Url;

use crate::http::pool::ConnectionPool;

const TOKEN_TYPE_HEADER: &str = "X-Snowflake-Authorization-Token-Type";
const TOKEN_TYPE_VALUE: &str = "KEYPAIR_JWT";

/// Status codes the Service returns for conditions worth retrying:
/// 400/403/405/408/429 plus the whole 5xx range. 403 is included
/// specifically because the Service returns it for a token that expired
/// mid-flight.
fn is_retryable(status: u16) -> bool {
    matches!(status, 400 | 403 | 405 | 408 | 429) || (500..=599).contains(&status)
}

/// Dispatches one request at a time through a shared [`ConnectionPool`],
/// attaching auth headers from a [`TokenProvider`] and retrying retryable
/// responses up to `http_retries` additional times.
pub struct RetryingExecutor {
    base_uri: Url,
    pool: Arc<ConnectionPool>,
    tokens: Arc<dyn TokenProvider>,
    http_retries: usize,
}

impl RetryingExecutor {
    /// Build an executor against `base_uri`, routing every request through
    /// `pool` and minting auth headers from `tokens`.
    pub fn new(base_uri: Url, pool: Arc<ConnectionPool>, tokens: Arc<dyn TokenProvider>, http_retries: usize) -> Self {
        Self { base_uri, pool, tokens, http_retries }
    }

    fn full_url(&self, path: &str) -> Result<Url> {
        self.base_uri
            .join(path)
            .map_err(|e| ClientError::Request(format!("cannot resolve path '{path}' against base URI: {e}")))
    }

    async fn dispatch_once(&self, method: HttpMethod, url: &Url, body: Option<&str>) -> Result<(u16, String)> {
        let token = self.tokens.current_token().await?;
        let reqwest_method = match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        self.pool
            .with(|conn| {
                let url = url.clone();
                let token = token.clone();
                let body = body.map(str::to_string);
                async move {
                    let mut request = conn
                        .client()
                        .request(reqwest_method, url)
                        .header("Content-Type", "application/json")
                        .header("Accept", "application/json")
                        .header("Authorization", format!("Bearer {token}"))
                        .header(TOKEN_TYPE_HEADER, TOKEN_TYPE_VALUE);
                    if let Some(body) = body {
                        request = request.body(body);
                    }

                    let started = Instant::now();
                    let response = request.send().await?;
                    let status = response.status().as_u16();
                    let elapsed = started.elapsed();
                    let response_body = response.text().await.unwrap_or_default();
                    debug!(status, elapsed_ms = elapsed.as_millis() as u64, "request completed");
                    Ok((status, response_body))
                }
            })
            .await
    }
}

#[async_trait]
impl RequestExecutor for RetryingExecutor {
    async fn execute(&self, method: HttpMethod, path: &str, body: Option<String>) -> Result<RawResponse> {
        let url = self.full_url(path)?;
        let total_attempts = self.http_retries + 1;
        let mut last_error: Option<ClientError> = None;

        for attempt in 0..total_attempts {
            let outcome = self.dispatch_once(method, &url, body.as_deref()).await;

            let (status, response_body) = match outcome {
                Ok(pair) => pair,
                Err(err) => {
                    last_error = Some(err);
                    if attempt + 1 < total_attempts {
                        #[allow(clippy::unwrap_used)]
                        info!("Retry attempt {} because {}", attempt + 1, last_error.as_ref().unwrap());
                        continue;
                    }
                    break;
                }
            };

            if status == 200 {
                return Ok(RawResponse { body: response_body });
            }

            let error = ClientError::BadResponse { status, body: response_body };
            if !is_retryable(status) {
                return Err(error);
            }

            last_error = Some(error);
            if attempt + 1 < total_attempts {
                #[allow(clippy::unwrap_used)]
                info!("Retry attempt {} because {}", attempt + 1, last_error.as_ref().unwrap());
            }
        }

        #[allow(clippy::unwrap_used)]
        Err(last_error.unwrap())
    }
}
