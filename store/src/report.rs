//! Phishing report storage trait.

use crate::StoreError;
use phishnet_types::{ContentHash, PhishingReport};

/// Trait for the report mirror, keyed by incident hash.
pub trait ReportStore: Send + Sync {
    fn get_report(&self, hash: &ContentHash) -> Result<PhishingReport, StoreError>;

    /// Insert the report only if no record exists for its incident hash.
    ///
    /// Returns `true` when the record was inserted, `false` when a record
    /// already existed (in which case the stored record is left untouched).
    /// The check and the insert happen inside one storage transaction, so
    /// concurrent appliers cannot race between them.
    fn insert_report_if_absent(&self, report: &PhishingReport) -> Result<bool, StoreError>;

    /// Unconditional overwrite, for request-layer edits (description,
    /// verified flag). Never used by event application.
    fn put_report(&self, report: &PhishingReport) -> Result<(), StoreError>;

    fn report_count(&self) -> Result<u64, StoreError>;

    fn iter_reports(&self) -> Result<Vec<PhishingReport>, StoreError>;
}
