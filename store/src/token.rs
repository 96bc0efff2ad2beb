//! Reputation-token balance storage trait.

use crate::StoreError;
use phishnet_types::ReputationToken;

/// Trait for per-account token balances, keyed by account address.
pub trait TokenStore: Send + Sync {
    fn get_tokens(&self, user_address: &str) -> Result<Option<ReputationToken>, StoreError>;

    /// Set the balance to the absolute amount reported by the ledger,
    /// creating the record when absent. Get-or-create and the overwrite
    /// happen in one storage transaction.
    fn set_tokens(&self, user_address: &str, tokens: u64) -> Result<(), StoreError>;

    fn iter_tokens(&self) -> Result<Vec<ReputationToken>, StoreError>;
}
