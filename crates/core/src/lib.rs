//! # Coldline Core
//!
//! Pure orchestration logic for executing a statement and materializing its
//! partitioned result set — no HTTP, JWT, or connection-pool code lives
//! here, only the ports those adapters implement.
//!
//! ## Architecture
//! - Only depends on `coldline-domain`
//! - No reqwest, no jsonwebtoken, no tokio I/O beyond task spawning
//! - All infrastructure reached through the [`ports`] traits

pub mod fetch;
pub mod orchestrator;
pub mod ports;
pub mod query;
pub mod result;

pub use fetch::{fetch_partition, fetch_remaining_sequential, fetch_remaining_threaded, submit_statement, SubmissionOutcome};
pub use orchestrator::{compute_workers, select_strategy, Strategy};
pub use ports::{HttpMethod, RawResponse, RequestExecutor, TokenProvider};
pub use query::run_query;
pub use result::{MaterializedResult, QueryResult, StreamingResult};
