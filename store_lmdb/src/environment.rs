//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::checkpoint::LmdbCheckpointStore;
use crate::report::LmdbReportStore;
use crate::reputation::LmdbReputationStore;
use crate::token::LmdbTokenStore;
use crate::LmdbError;

const MAX_DBS: u32 = 8;
/// Default map size: 1 GiB. LMDB allocates lazily, this is only a ceiling.
const DEFAULT_MAP_SIZE: usize = 1 << 30;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    reports_db: Database<Bytes, Bytes>,
    domains_db: Database<Bytes, Bytes>,
    tokens_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path with the
    /// default map size.
    pub fn open(path: &Path) -> Result<Self, LmdbError> {
        Self::open_with_map_size(path, DEFAULT_MAP_SIZE)
    }

    pub fn open_with_map_size(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)
            .map_err(|e| LmdbError::Heed(format!("create data dir: {e}")))?;

        // Safety: the environment directory is only opened once per process
        // and never memory-mapped by anything else.
        let env = unsafe {
            EnvOpenOptions::new()
                .max_dbs(MAX_DBS)
                .map_size(map_size)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let reports_db = env.create_database(&mut wtxn, Some("reports"))?;
        let domains_db = env.create_database(&mut wtxn, Some("domains"))?;
        let tokens_db = env.create_database(&mut wtxn, Some("tokens"))?;
        let meta_db = env.create_database(&mut wtxn, Some("meta"))?;
        wtxn.commit()?;

        Ok(Self {
            env: Arc::new(env),
            reports_db,
            domains_db,
            tokens_db,
            meta_db,
        })
    }

    pub fn report_store(&self) -> LmdbReportStore {
        LmdbReportStore {
            env: self.env.clone(),
            reports_db: self.reports_db,
        }
    }

    pub fn reputation_store(&self) -> LmdbReputationStore {
        LmdbReputationStore {
            env: self.env.clone(),
            domains_db: self.domains_db,
        }
    }

    pub fn token_store(&self) -> LmdbTokenStore {
        LmdbTokenStore {
            env: self.env.clone(),
            tokens_db: self.tokens_db,
        }
    }

    pub fn checkpoint_store(&self) -> LmdbCheckpointStore {
        LmdbCheckpointStore {
            env: self.env.clone(),
            meta_db: self.meta_db,
        }
    }
}
