//! # Coldline Infrastructure
//!
//! Concrete adapters for the ports `coldline-core` defines: keypair-JWT
//! authentication, the bounded connection pool, the retrying request
//! executor, and environment-based configuration loading.
//!
//! This crate contains:
//! - Key fingerprinting and JWT minting (`auth::fingerprint`, `auth::jwt`)
//! - Single-flight token caching (`auth::token_cache`)
//! - The connection pool and retrying executor (`http`)
//! - Environment variable configuration loading (`config`)
//! - Foreign-error-to-`ClientError` conversions (`errors`)
//!
//! ## Architecture
//! - Implements `coldline_core::ports` traits (`TokenProvider`, `RequestExecutor`)
//! - Depends on `coldline-domain` and `coldline-core`
//! - Owns every third-party I/O dependency (reqwest, jsonwebtoken, rsa)

pub mod auth;
pub mod config;
pub mod errors;
pub mod http;

pub use auth::TokenCache;
pub use http::{ConnectionPool, RetryingExecutor};
