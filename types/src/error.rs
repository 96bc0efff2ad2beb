use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("invalid hash '{0}': expected 64 hex characters")]
    InvalidHashLength(String),

    #[error("invalid hash '{input}': {source}")]
    InvalidHex {
        input: String,
        source: hex::FromHexError,
    },
}
