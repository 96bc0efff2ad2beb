//! Mirror records for domain reputation and per-account token balances.

use serde::{Deserialize, Serialize};

/// Aggregated reputation for a domain, refreshed from ledger state.
///
/// Never created by direct user action — only the listener's aggregation
/// step writes these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainReputation {
    pub domain: String,
    pub reputation_score: f64,
    /// Unix seconds of the last aggregation pass.
    pub last_updated: u64,
}

impl DomainReputation {
    pub fn new(domain: String, reputation_score: f64, last_updated: u64) -> Self {
        Self {
            domain,
            reputation_score,
            last_updated,
        }
    }
}

/// Reputation-token balance for one account.
///
/// The balance mirrors the absolute on-chain amount from the most recent
/// `TokensAwarded` event — last-write-wins, never incremented locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationToken {
    pub user_address: String,
    pub tokens: u64,
}

impl ReputationToken {
    pub fn new(user_address: String, tokens: u64) -> Self {
        Self {
            user_address,
            tokens,
        }
    }
}
