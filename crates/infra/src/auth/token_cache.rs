//! Single-flight token cache with double-checked locking.
//!
//! A fast read path over a shared `RwLock` snapshot, and a capacity-1
//! mutex around the mint itself so concurrent callers racing an expiry
//! converge on a single issuance.

use chrono::Utc;
use coldline_core::TokenProvider;
use coldline_domain::{ClientConfig, Fingerprint, Result};
use tokio::sync::{Mutex, RwLock};

use crate::auth::{fingerprint, jwt};

#[derive(Debug, Clone)]
struct TokenState {
    token: String,
    expires_at: i64,
}

/// Caches a keypair-JWT, re-minting it once it has strictly expired.
pub struct TokenCache {
    config: ClientConfig,
    fingerprint: Fingerprint,
    state: RwLock<Option<TokenState>>,
    mint_lock: Mutex<()>,
}

impl TokenCache {
    /// Build a cache for `config`, deriving and fixing the key fingerprint
    /// once up front (it never changes for the lifetime of a client).
    pub fn new(config: ClientConfig) -> Result<Self> {
        let private_key = fingerprint::parse_private_key(config.private_key_pem())?;
        let fingerprint = fingerprint::fingerprint_of(&private_key)?;
        Ok(Self { config, fingerprint, state: RwLock::new(None), mint_lock: Mutex::new(()) })
    }

    /// The key fingerprint this cache mints tokens under.
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    async fn valid_cached_token(&self) -> Option<String> {
        let guard = self.state.read().await;
        guard.as_ref().filter(|state| !is_expired(state.expires_at)).map(|state| state.token.clone())
    }
}

#[async_trait::async_trait]
impl TokenProvider for TokenCache {
    async fn current_token(&self) -> Result<String> {
        if let Some(token) = self.valid_cached_token().await {
            return Ok(token);
        }

        // Only one caller mints at a time; everyone else blocks here and
        // then re-checks, since the winner may have already refreshed it.
        let _permit = self.mint_lock.lock().await;
        if let Some(token) = self.valid_cached_token().await {
            return Ok(token);
        }

        let (token, expires_at) = jwt::mint(&self.config, &self.fingerprint)?;
        *self.state.write().await = Some(TokenState { token: token.clone(), expires_at });
        Ok(token)
    }
}

fn is_expired(expires_at: i64) -> bool {
    Utc::now().timestamp() > expires_at
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const TEST_KEY_PEM: &str = include_str!("../../tests/fixtures/test_key.pem");

    fn sample_config(jwt_ttl_secs: u64) -> ClientConfig {
        ClientConfig::builder(
            "https://example.snowflakecomputing.com",
            TEST_KEY_PEM,
            "org",
            "acct",
            "user",
            "wh",
        )
        .jwt_ttl_secs(jwt_ttl_secs)
        .build()
        .unwrap()
    }

    #[tokio::test]
    async fn reuses_token_until_expiry() {
        let cache = TokenCache::new(sample_config(3600)).unwrap();
        let first = cache.current_token().await.unwrap();
        let second = cache.current_token().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn mints_fresh_token_once_expired() {
        let cache = TokenCache::new(sample_config(0)).unwrap();
        let first = cache.current_token().await.unwrap();
        // ttl=0 means exp == iat, so "strictly in the future" already fails
        // by the time we ask again a moment later.
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        let second = cache.current_token().await.unwrap();
        // Tokens embed `iat`/`exp` so distinct mints produce distinct JWTs.
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn concurrent_callers_observe_a_single_issuance_per_expiry() {
        let cache = Arc::new(TokenCache::new(sample_config(3600)).unwrap());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move { cache.current_token().await.unwrap() }));
        }
        let mut tokens = Vec::new();
        for handle in handles {
            tokens.push(handle.await.unwrap());
        }
        assert!(tokens.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
