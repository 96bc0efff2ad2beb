//! The 32-byte content hash used as the idempotency key across ledger
//! and mirror storage.

use crate::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 32-byte content digest identifying a report or a domain.
///
/// The same type covers both incident hashes and domain hashes — the ledger
/// contract takes `bytes32` for either.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Parse from a hex string. A leading `0x` is accepted and stripped;
    /// the remainder must be exactly 64 hex digits.
    pub fn from_hex(input: &str) -> Result<Self, TypeError> {
        let stripped = input.strip_prefix("0x").unwrap_or(input);
        if stripped.len() != 64 {
            return Err(TypeError::InvalidHashLength(input.to_string()));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(stripped, &mut bytes).map_err(|e| TypeError::InvalidHex {
            input: input.to_string(),
            source: e,
        })?;
        Ok(Self(bytes))
    }

    /// Bare lowercase hex, no `0x` prefix (the mirror's canonical form).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for ContentHash {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[31] = 0x01;
        let h = ContentHash::new(bytes);
        let parsed = ContentHash::from_hex(&h.to_hex()).unwrap();
        assert_eq!(h, parsed);
    }

    #[test]
    fn accepts_0x_prefix() {
        let bare = "11".repeat(32);
        let prefixed = format!("0x{bare}");
        assert_eq!(
            ContentHash::from_hex(&bare).unwrap(),
            ContentHash::from_hex(&prefixed).unwrap()
        );
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(ContentHash::from_hex("abcd").is_err());
        assert!(ContentHash::from_hex(&"11".repeat(33)).is_err());
        assert!(ContentHash::from_hex("").is_err());
    }

    #[test]
    fn rejects_non_hex() {
        let bad = "zz".repeat(32);
        assert!(ContentHash::from_hex(&bad).is_err());
    }

    #[test]
    fn display_is_bare_lowercase() {
        let h = ContentHash::from_hex(&"AB".repeat(32)).unwrap();
        assert_eq!(h.to_string(), "ab".repeat(32));
    }
}
