//! # Coldline Domain
//!
//! Domain types and models for the Coldline warehouse client.
//!
//! This crate contains:
//! - Configuration types (`ClientConfig`)
//! - Domain error types and the crate-wide `Result` alias
//! - Typed row/value models (`RowType`, `CellValue`, `Row`, `RowSchema`)
//! - The wire contract's JSON shapes and a pure cell decoder
//!
//! ## Architecture
//! - No dependencies on other Coldline crates
//! - No HTTP, async runtime, or platform code — pure data and logic

pub mod config;
pub mod decode;
pub mod errors;
pub mod types;
pub mod wire;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use errors::{ClientError, Result};
pub use types::{CellValue, Fingerprint, Row, RowSchema, RowType, TypeTag};
