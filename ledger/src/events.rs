//! Domain-level views of the contract's events.
//!
//! The abigen filter structs carry raw `[u8; 32]` and `Address` values;
//! these wrappers convert them into the workspace's own types so the
//! listener never touches ethers types directly.

use crate::contract::{ReportSubmittedFilter, TokensAwardedFilter};
use ethers::types::U256;
use ethers::utils::to_checksum;
use phishnet_types::ContentHash;

/// A `ReportSubmitted` contract event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportSubmittedEvent {
    pub report_hash: ContentHash,
    pub domain_hash: ContentHash,
    /// Checksum-formatted reporter address.
    pub reporter: String,
}

impl From<ReportSubmittedFilter> for ReportSubmittedEvent {
    fn from(f: ReportSubmittedFilter) -> Self {
        Self {
            report_hash: ContentHash::new(f.report_hash),
            domain_hash: ContentHash::new(f.domain_hash),
            reporter: to_checksum(&f.reporter, None),
        }
    }
}

/// A `TokensAwarded` contract event. `amount` is the cumulative on-chain
/// balance, not a delta.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokensAwardedEvent {
    /// Checksum-formatted account address.
    pub user: String,
    pub amount: u64,
}

impl From<TokensAwardedFilter> for TokensAwardedEvent {
    fn from(f: TokensAwardedFilter) -> Self {
        Self {
            user: to_checksum(&f.user, None),
            amount: clamp_u64(f.amount),
        }
    }
}

/// The mirror stores balances as u64; anything larger saturates.
pub(crate) fn clamp_u64(value: U256) -> u64 {
    if value > U256::from(u64::MAX) {
        u64::MAX
    } else {
        value.as_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::Address;

    #[test]
    fn report_event_converts_hashes_and_checksums_reporter() {
        let filter = ReportSubmittedFilter {
            report_hash: [0x11; 32],
            domain_hash: [0x33; 32],
            reporter: Address::from_low_u64_be(0xdead),
        };
        let ev = ReportSubmittedEvent::from(filter);
        assert_eq!(ev.report_hash.to_hex(), "11".repeat(32));
        assert_eq!(ev.domain_hash.to_hex(), "33".repeat(32));
        assert!(ev.reporter.starts_with("0x"));
    }

    #[test]
    fn clamp_saturates_oversized_amounts() {
        assert_eq!(clamp_u64(U256::from(42u64)), 42);
        assert_eq!(clamp_u64(U256::from(u64::MAX)), u64::MAX);
        assert_eq!(clamp_u64(U256::from(u64::MAX) + 1), u64::MAX);
    }
}
