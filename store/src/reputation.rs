//! Domain reputation storage trait.

use crate::StoreError;
use phishnet_types::DomainReputation;

/// Trait for the domain-reputation mirror, keyed by domain string.
pub trait ReputationStore: Send + Sync {
    fn get_domain(&self, domain: &str) -> Result<Option<DomainReputation>, StoreError>;

    /// Upsert the aggregated reputation for a domain.
    fn put_domain(&self, reputation: &DomainReputation) -> Result<(), StoreError>;

    fn iter_domains(&self) -> Result<Vec<DomainReputation>, StoreError>;
}
