//! LMDB implementation of CheckpointStore.
//!
//! The checkpoint lives under a fixed key in the `meta` database. Each
//! write is one committed transaction, so a concurrent reader sees either
//! the old or the new value, never a torn one.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use phishnet_store::checkpoint::CheckpointStore;
use phishnet_store::StoreError;

use crate::LmdbError;

const LAST_HASH_KEY: &[u8] = b"last_processed_hash";

pub struct LmdbCheckpointStore {
    pub(crate) env: Arc<Env>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl CheckpointStore for LmdbCheckpointStore {
    fn last_hash(&self) -> Result<String, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .meta_db
            .get(&rtxn, LAST_HASH_KEY)
            .map_err(LmdbError::from)?
        {
            Some(bytes) => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| StoreError::Corruption(format!("checkpoint is not utf-8: {e}"))),
            // Never written yet — unset, not an error.
            None => Ok(String::new()),
        }
    }

    fn set_last_hash(&self, hash: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.meta_db
            .put(&mut wtxn, LAST_HASH_KEY, hash.as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
