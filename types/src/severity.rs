//! Three-level severity scale derived from a continuous phishing score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity classification for a phishing score in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Moderate,
    High,
}

/// Scores at or above this are High.
const HIGH_THRESHOLD: f64 = 0.85;
/// Scores at or above this (but below High) are Moderate.
const MODERATE_THRESHOLD: f64 = 0.6;

impl Severity {
    /// Map a score to a severity level. Thresholds are inclusive lower
    /// bounds: 0.85 is High, 0.6 is Moderate.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Severity::High
        } else if score >= MODERATE_THRESHOLD {
            Severity::Moderate
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
