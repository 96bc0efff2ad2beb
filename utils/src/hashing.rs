//! Content hashing for reports and domains.
//!
//! Incident hashes are SHA-256 over the raw report content; domain hashes
//! are SHA-256 over the lowercased domain string. Both feed the contract's
//! `bytes32` parameters.

use phishnet_types::ContentHash;
use sha2::{Digest, Sha256};

/// SHA-256 digest of arbitrary content.
pub fn sha256_hash(content: &[u8]) -> ContentHash {
    let digest = Sha256::digest(content);
    ContentHash::new(digest.into())
}

/// Canonical hash for a domain name (case-insensitive).
pub fn domain_hash(domain: &str) -> ContentHash {
    sha256_hash(domain.trim().to_ascii_lowercase().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_hash_is_case_insensitive() {
        assert_eq!(domain_hash("Example.COM"), domain_hash("example.com"));
        assert_eq!(domain_hash(" example.com "), domain_hash("example.com"));
    }

    #[test]
    fn known_sha256_vector() {
        // SHA-256("abc")
        let h = sha256_hash(b"abc");
        assert_eq!(
            h.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
