//! The mirror record for a submitted phishing report.

use crate::ContentHash;
use serde::{Deserialize, Serialize};

/// A phishing report mirrored from the ledger.
///
/// Identity is `incident_hash`; creation from events is idempotent on that
/// key. `verified` and `description` are owned by the request-handling side
/// and are never touched by event replay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhishingReport {
    /// Unique content hash of the reported incident.
    pub incident_hash: ContentHash,
    /// Checksum-formatted address of the reporting account.
    pub reporter_address: String,
    /// Reported domain (hex domain hash until a resolver fills it in).
    pub domain: String,
    /// Free-text description supplied by the reporter.
    pub description: String,
    /// Unix seconds at which the mirror first saw this report.
    pub detected_at: u64,
    /// Whether a moderator has verified the report.
    pub verified: bool,
}

impl PhishingReport {
    /// A fresh, unverified report as created from a `ReportSubmitted` event.
    pub fn from_event(
        incident_hash: ContentHash,
        domain: String,
        reporter_address: String,
        detected_at: u64,
    ) -> Self {
        Self {
            incident_hash,
            reporter_address,
            domain,
            description: String::new(),
            detected_at,
            verified: false,
        }
    }
}
