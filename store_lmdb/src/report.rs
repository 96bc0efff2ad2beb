//! LMDB implementation of ReportStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use phishnet_store::report::ReportStore;
use phishnet_store::StoreError;
use phishnet_types::{ContentHash, PhishingReport};

use crate::LmdbError;

pub struct LmdbReportStore {
    pub(crate) env: Arc<Env>,
    pub(crate) reports_db: Database<Bytes, Bytes>,
}

impl ReportStore for LmdbReportStore {
    fn get_report(&self, hash: &ContentHash) -> Result<PhishingReport, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .reports_db
            .get(&rtxn, hash.as_bytes())
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(format!("report {hash}")))?;
        let report = bincode::deserialize(bytes).map_err(LmdbError::from)?;
        Ok(report)
    }

    fn insert_report_if_absent(&self, report: &PhishingReport) -> Result<bool, StoreError> {
        let key = report.incident_hash.as_bytes();
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        // Check and insert under the same write transaction — duplicate
        // events observed concurrently cannot both insert.
        if self
            .reports_db
            .get(&wtxn, key)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Ok(false);
        }
        let bytes = bincode::serialize(report).map_err(LmdbError::from)?;
        self.reports_db
            .put(&mut wtxn, key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(true)
    }

    fn put_report(&self, report: &PhishingReport) -> Result<(), StoreError> {
        let bytes = bincode::serialize(report).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.reports_db
            .put(&mut wtxn, report.incident_hash.as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn report_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.reports_db.len(&rtxn).map_err(LmdbError::from)?)
    }

    fn iter_reports(&self) -> Result<Vec<PhishingReport>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.reports_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_, val) = entry.map_err(LmdbError::from)?;
            let report = bincode::deserialize(val).map_err(LmdbError::from)?;
            results.push(report);
        }
        Ok(results)
    }
}
