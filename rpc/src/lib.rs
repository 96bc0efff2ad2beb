//! HTTP API for the phishnet backend.
//!
//! Provides endpoints for:
//! - Report-hash submission to the ledger
//! - The last-processed-hash checkpoint (read and write)
//! - Mirror reads (reports, domain reputations, token balances)
//! - Content analysis via the classifier gateway
//!
//! Every failure surfaces as a JSON `{"error": ...}` body, never a raw
//! stack trace.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{ApiState, RpcServer};
