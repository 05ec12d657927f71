//! HTTP transport: the bounded connection pool and the retrying request
//! executor built on top of it.

pub mod executor;
pub mod pool;

pub use executor::RetryingExecutor;
pub use pool::ConnectionPool;
