//! Checkpoint storage trait.

use crate::StoreError;

/// Durable single-value store for the last externally-confirmed event hash.
///
/// `last_hash` returns the empty string when nothing has ever been written —
/// that is the unset state, not an error. Writes are atomic with respect to
/// concurrent reads: a reader never observes a partially written value.
pub trait CheckpointStore: Send + Sync {
    fn last_hash(&self) -> Result<String, StoreError>;

    fn set_last_hash(&self, hash: &str) -> Result<(), StoreError>;
}
