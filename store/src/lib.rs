//! Abstract storage traits for the phishnet mirror.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The listener and the RPC layer depend only on the traits, never
//! on a concrete backend.

pub mod checkpoint;
pub mod error;
pub mod report;
pub mod reputation;
pub mod token;

pub use checkpoint::CheckpointStore;
pub use error::StoreError;
pub use report::ReportStore;
pub use reputation::ReputationStore;
pub use token::TokenStore;
