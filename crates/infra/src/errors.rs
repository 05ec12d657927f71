//! Conversions from external infrastructure errors into [`ClientError`].
//!
//! Only covers error types actually produced via `?` at a call site; a
//! third-party error that's always hand-mapped with `.map_err` for
//! richer context (the key-parsing errors in `auth::fingerprint`, the
//! body-decode errors in `coldline-core::fetch`) has no `From` impl here.

use coldline_domain::ClientError;

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            return ClientError::Connection(err.to_string());
        }
        if let Some(status) = err.status() {
            return ClientError::BadResponse { status: status.as_u16(), body: err.to_string() };
        }
        ClientError::Connection(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ClientError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ClientError::Config(format!("JWT error: {err}"))
    }
}
