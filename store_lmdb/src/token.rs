//! LMDB implementation of TokenStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use phishnet_store::token::TokenStore;
use phishnet_store::StoreError;
use phishnet_types::ReputationToken;

use crate::LmdbError;

pub struct LmdbTokenStore {
    pub(crate) env: Arc<Env>,
    pub(crate) tokens_db: Database<Bytes, Bytes>,
}

impl TokenStore for LmdbTokenStore {
    fn get_tokens(&self, user_address: &str) -> Result<Option<ReputationToken>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .tokens_db
            .get(&rtxn, user_address.as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let record = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn set_tokens(&self, user_address: &str, tokens: u64) -> Result<(), StoreError> {
        // The ledger reports absolute balances; whatever was stored before
        // is irrelevant, so get-or-create collapses into a plain put.
        let record = ReputationToken::new(user_address.to_string(), tokens);
        let bytes = bincode::serialize(&record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.tokens_db
            .put(&mut wtxn, user_address.as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_tokens(&self) -> Result<Vec<ReputationToken>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.tokens_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_, val) = entry.map_err(LmdbError::from)?;
            results.push(bincode::deserialize(val).map_err(LmdbError::from)?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_test_env() -> (tempfile::TempDir, crate::LmdbEnvironment) {
        let dir = tempfile::tempdir().unwrap();
        let env = crate::LmdbEnvironment::open_with_map_size(dir.path(), 1 << 22).unwrap();
        (dir, env)
    }

    #[test]
    fn missing_account_is_none() {
        let (_dir, env) = open_test_env();
        let store = env.token_store();
        assert!(store.get_tokens("0xNobody").unwrap().is_none());
    }

    #[test]
    fn balance_is_overwritten_not_accumulated() {
        let (_dir, env) = open_test_env();
        let store = env.token_store();

        store.set_tokens("0xAlice", 5).unwrap();
        store.set_tokens("0xAlice", 12).unwrap();

        let record = store.get_tokens("0xAlice").unwrap().unwrap();
        assert_eq!(record.tokens, 12);
    }

    #[test]
    fn iter_tokens_returns_all_accounts() {
        let (_dir, env) = open_test_env();
        let store = env.token_store();

        store.set_tokens("0xAlice", 10).unwrap();
        store.set_tokens("0xBob", 20).unwrap();

        let all = store.iter_tokens().unwrap();
        assert_eq!(all.len(), 2);
    }
}
