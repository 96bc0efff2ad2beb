use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Missing or malformed configuration. Fatal at startup, never a
    /// per-call error.
    #[error("ledger configuration error: {0}")]
    Config(String),

    /// Transaction build, signing or broadcast failure. The caller must not
    /// assume anything was mined — only that broadcast did not happen.
    #[error("ledger submission failed: {0}")]
    Submission(String),

    /// Read-only RPC failure. Side-effect free, safe for the caller to retry.
    #[error("ledger read failed: {0}")]
    Read(String),
}
