//! LMDB implementation of ReputationStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use phishnet_store::reputation::ReputationStore;
use phishnet_store::StoreError;
use phishnet_types::DomainReputation;

use crate::LmdbError;

pub struct LmdbReputationStore {
    pub(crate) env: Arc<Env>,
    pub(crate) domains_db: Database<Bytes, Bytes>,
}

impl ReputationStore for LmdbReputationStore {
    fn get_domain(&self, domain: &str) -> Result<Option<DomainReputation>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .domains_db
            .get(&rtxn, domain.as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let rep = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(rep))
            }
            None => Ok(None),
        }
    }

    fn put_domain(&self, reputation: &DomainReputation) -> Result<(), StoreError> {
        let bytes = bincode::serialize(reputation).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.domains_db
            .put(&mut wtxn, reputation.domain.as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_domains(&self) -> Result<Vec<DomainReputation>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.domains_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_, val) = entry.map_err(LmdbError::from)?;
            results.push(bincode::deserialize(val).map_err(LmdbError::from)?);
        }
        Ok(results)
    }
}
