//! Ethereum ledger client for the phishnet registry.
//!
//! Wraps the deployed `PhishingReputation` contract behind a small, typed
//! surface: report-hash submission (broadcast only), read-only reputation
//! queries and event-window fetches for the listener. The connection and
//! contract handle are built once at startup from [`LedgerConfig`] and are
//! immutable afterwards.

pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod events;

pub use client::LedgerClient;
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use events::{ReportSubmittedEvent, TokensAwardedEvent};
