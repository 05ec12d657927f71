//! Error types used throughout the client.

use thiserror::Error;

/// Errors produced by the Coldline client.
///
/// Each variant carries enough context for a caller to log or branch on
/// without re-parsing a message string. `RetryableBadResponse` is
/// intentionally absent here: it is an internal signal used by the request
/// executor's retry loop and never escapes to a caller — see
/// `coldline_infra::http::executor`.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Missing/invalid private key PEM, malformed base URI, or an invalid
    /// tunable (e.g. `max_connections < max_threads_per_query + 1`).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport failure: DNS, TCP, TLS, or socket I/O.
    #[error("connection error: {0}")]
    Connection(String),

    /// Pool checkout exceeded `connection_timeout`.
    #[error("connection pool starved: no connection available within {timeout_secs}s")]
    ConnectionStarved {
        /// The configured checkout timeout that was exceeded.
        timeout_secs: u64,
    },

    /// The Service returned a terminal non-200 response, or a retryable
    /// response survived all configured retry attempts.
    #[error("bad response: status {status}, body: {body}")]
    BadResponse {
        /// HTTP status code returned by the Service.
        status: u16,
        /// Raw response body, for diagnostics.
        body: String,
    },

    /// A request could not be constructed (e.g. unserializable body).
    #[error("request error: {0}")]
    Request(String),
}

/// Result type alias for Coldline operations.
pub type Result<T> = std::result::Result<T, ClientError>;
