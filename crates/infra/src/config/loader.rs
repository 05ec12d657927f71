//! Environment-variable configuration loader.
//!
//! Reads each required variable, failing with a `ConfigError` naming the
//! specific missing variable rather than a generic "config invalid"
//! message. There is no file-based fallback — `connect()` is driven by
//! the process environment only.
//!
//! ## Environment variables
//! - `SNOWFLAKE_URI`
//! - `SNOWFLAKE_PRIVATE_KEY` or `SNOWFLAKE_PRIVATE_KEY_PATH`
//! - `SNOWFLAKE_ORGANIZATION`
//! - `SNOWFLAKE_ACCOUNT`
//! - `SNOWFLAKE_USER`
//! - `SNOWFLAKE_DEFAULT_WAREHOUSE`

use coldline_domain::{ClientConfigBuilder, ClientError, Result};

/// Build a [`ClientConfigBuilder`] from the process environment.
///
/// The private key is read from `SNOWFLAKE_PRIVATE_KEY` directly, or from
/// the file named by `SNOWFLAKE_PRIVATE_KEY_PATH` if the former is unset.
/// Tunables (JWT TTL, pool size, retries, ...) keep their defaults; callers
/// can still override them on the returned builder before calling
/// `.build()`.
pub fn load_from_env() -> Result<ClientConfigBuilder> {
    let base_uri = required_env("SNOWFLAKE_URI")?;
    let private_key_pem = load_private_key()?;
    let organization = required_env("SNOWFLAKE_ORGANIZATION")?;
    let account = required_env("SNOWFLAKE_ACCOUNT")?;
    let user = required_env("SNOWFLAKE_USER")?;
    let default_warehouse = required_env("SNOWFLAKE_DEFAULT_WAREHOUSE")?;

    Ok(coldline_domain::ClientConfig::builder(
        base_uri,
        private_key_pem,
        organization,
        account,
        user,
        default_warehouse,
    ))
}

fn load_private_key() -> Result<String> {
    if let Ok(pem) = std::env::var("SNOWFLAKE_PRIVATE_KEY") {
        return Ok(pem);
    }
    let path = required_env("SNOWFLAKE_PRIVATE_KEY_PATH")
        .map_err(|_| ClientError::Config("neither SNOWFLAKE_PRIVATE_KEY nor SNOWFLAKE_PRIVATE_KEY_PATH is set".into()))?;
    std::fs::read_to_string(&path)
        .map_err(|e| ClientError::Config(format!("failed to read private key from '{path}': {e}")))
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| ClientError::Config(format!("missing required environment variable: {key}")))
}
