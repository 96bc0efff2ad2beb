//! Core domain types shared across the phishnet workspace.
//!
//! Everything here is plain data: content hashes, mirror records and the
//! severity scale. No I/O, no async — the storage and network crates build
//! on top of these.

pub mod error;
pub mod hash;
pub mod report;
pub mod reputation;
pub mod severity;

pub use error::TypeError;
pub use hash::ContentHash;
pub use report::PhishingReport;
pub use reputation::{DomainReputation, ReputationToken};
pub use severity::Severity;
