//! LMDB storage backend for the phishnet mirror.
//!
//! Implements all storage traits from `phishnet-store` using the `heed`
//! LMDB bindings. Each logical store maps to one named LMDB database within
//! a single environment; every mutation commits one write transaction, so
//! readers never observe torn values and upserts are atomic.

pub mod checkpoint;
pub mod environment;
pub mod error;
pub mod report;
pub mod reputation;
pub mod token;

pub use checkpoint::LmdbCheckpointStore;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use report::LmdbReportStore;
pub use reputation::LmdbReputationStore;
pub use token::LmdbTokenStore;
