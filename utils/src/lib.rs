//! Shared utilities for the phishnet backend.

pub mod hashing;
pub mod logging;
pub mod time;

pub use hashing::{domain_hash, sha256_hash};
pub use logging::init_tracing;
pub use time::unix_timestamp_secs;
