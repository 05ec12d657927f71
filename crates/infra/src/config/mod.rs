//! Environment-based configuration loading for [`Client::connect`](https://docs.rs/coldline-client).

pub mod loader;

pub use loader::load_from_env;
