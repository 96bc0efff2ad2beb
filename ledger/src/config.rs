//! Ledger connection configuration.

use crate::LedgerError;
use std::env;

/// Default chain id: Sepolia, where the reference contract is deployed.
pub const DEFAULT_CHAIN_ID: u64 = 11_155_111;

const ENV_RPC_URL: &str = "PHISHNET_ETH_RPC_URL";
const ENV_CONTRACT_ADDRESS: &str = "PHISHNET_CONTRACT_ADDRESS";
const ENV_SIGNING_KEY: &str = "PHISHNET_SIGNING_KEY";
const ENV_CHAIN_ID: &str = "PHISHNET_CHAIN_ID";

/// Everything needed to talk to the deployed contract.
///
/// All ledger-dependent components require this at startup; a missing value
/// aborts the process instead of failing on first use.
#[derive(Clone, Debug)]
pub struct LedgerConfig {
    /// HTTP JSON-RPC endpoint of the Ethereum node.
    pub rpc_url: String,
    /// Deployed `PhishingReputation` contract address (checksummed or not).
    pub contract_address: String,
    /// Hex-encoded private key the backend signs submissions with.
    pub signing_key: String,
    /// Chain id baked into signatures.
    pub chain_id: u64,
}

impl LedgerConfig {
    /// Read the configuration from the environment.
    ///
    /// `PHISHNET_ETH_RPC_URL`, `PHISHNET_CONTRACT_ADDRESS` and
    /// `PHISHNET_SIGNING_KEY` are required; `PHISHNET_CHAIN_ID` defaults to
    /// Sepolia.
    pub fn from_env() -> Result<Self, LedgerError> {
        let rpc_url = require(ENV_RPC_URL)?;
        let contract_address = require(ENV_CONTRACT_ADDRESS)?;
        let signing_key = require(ENV_SIGNING_KEY)?;
        let chain_id = match env::var(ENV_CHAIN_ID) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                LedgerError::Config(format!("{ENV_CHAIN_ID}='{raw}' is not a chain id: {e}"))
            })?,
            Err(_) => DEFAULT_CHAIN_ID,
        };

        Ok(Self {
            rpc_url,
            contract_address,
            signing_key,
            chain_id,
        })
    }
}

fn require(name: &str) -> Result<String, LedgerError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(LedgerError::Config(format!(
            "missing environment variable: {name}"
        ))),
    }
}
