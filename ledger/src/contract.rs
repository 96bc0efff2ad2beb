//! Bindings for the deployed `PhishingReputation` contract.

use ethers::prelude::abigen;

// The fixed ABI the backend is built against. Report and domain hashes are
// 32-byte digests; reputation scores are unsigned integers; token awards
// carry the cumulative balance for the user.
abigen!(
    PhishingReputation,
    r#"[
        function submitReport(bytes32 reportHash, bytes32 domainHash)
        function getDomainReputation(bytes32 domainHash) view returns (uint256)
        event ReportSubmitted(bytes32 indexed reportHash, bytes32 domainHash, address indexed reporter)
        event TokensAwarded(address indexed user, uint256 amount)
    ]"#
);
