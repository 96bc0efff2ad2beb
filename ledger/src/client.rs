//! The stateless wrapper around the deployed contract.

use std::sync::Arc;
use std::time::Duration;

use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use ethers::utils::to_checksum;

use phishnet_types::ContentHash;

use crate::contract::{PhishingReputation, ReportSubmittedFilter, TokensAwardedFilter};
use crate::events::{clamp_u64, ReportSubmittedEvent, TokensAwardedEvent};
use crate::{LedgerConfig, LedgerError};

/// Per-request timeout on the underlying RPC transport. A stalled endpoint
/// must not hang the caller.
const RPC_TIMEOUT_SECS: u64 = 15;

type ContractMiddleware = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Handle to the deployed `PhishingReputation` contract.
///
/// Constructed once at process start and shared by `Arc`; holds no mutable
/// state of its own.
pub struct LedgerClient {
    contract: PhishingReputation<ContractMiddleware>,
    contract_address: Address,
    sender: Address,
}

impl LedgerClient {
    /// Build a client from configuration. Malformed RPC URL, contract
    /// address or signing key is a fatal [`LedgerError::Config`].
    pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let url: reqwest::Url = config
            .rpc_url
            .parse()
            .map_err(|e| LedgerError::Config(format!("invalid RPC URL: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(RPC_TIMEOUT_SECS))
            .build()
            .map_err(|e| LedgerError::Config(format!("HTTP client: {e}")))?;
        let provider = Provider::new(Http::new_with_client(url, http));

        let contract_address: Address = config
            .contract_address
            .parse()
            .map_err(|e| LedgerError::Config(format!("invalid contract address: {e}")))?;

        let wallet: LocalWallet = config
            .signing_key
            .parse()
            .map_err(|e| LedgerError::Config(format!("invalid signing key: {e}")))?;
        let wallet = wallet.with_chain_id(config.chain_id);
        let sender = wallet.address();

        tracing::info!(
            contract = %to_checksum(&contract_address, None),
            sender = %to_checksum(&sender, None),
            chain_id = config.chain_id,
            "ledger client initialized"
        );

        let middleware = Arc::new(SignerMiddleware::new(provider, wallet));
        let contract = PhishingReputation::new(contract_address, middleware);

        Ok(Self {
            contract,
            contract_address,
            sender,
        })
    }

    /// Checksum-formatted contract address.
    pub fn contract_address(&self) -> String {
        to_checksum(&self.contract_address, None)
    }

    /// Checksum-formatted address the backend signs with.
    pub fn sender_address(&self) -> String {
        to_checksum(&self.sender, None)
    }

    /// Sign and broadcast a `submitReport` transaction.
    ///
    /// Returns the transaction hash once the node accepted the broadcast.
    /// Mining is not awaited — success here means "broadcast", nothing more.
    pub async fn submit_report_hash(
        &self,
        report_hash: &ContentHash,
        domain_hash: &ContentHash,
    ) -> Result<String, LedgerError> {
        let call = self
            .contract
            .submit_report(report_hash.to_bytes(), domain_hash.to_bytes());
        let pending = call
            .send()
            .await
            .map_err(|e| LedgerError::Submission(e.to_string()))?;
        let tx_hash = pending.tx_hash();
        tracing::info!(%report_hash, tx = ?tx_hash, "report hash broadcast");
        Ok(format!("{tx_hash:?}"))
    }

    /// Read the aggregate reputation for a domain hash from contract state.
    /// Side-effect free; safe to retry.
    pub async fn get_domain_reputation(
        &self,
        domain_hash: &ContentHash,
    ) -> Result<u64, LedgerError> {
        let score = self
            .contract
            .get_domain_reputation(domain_hash.to_bytes())
            .call()
            .await
            .map_err(|e| LedgerError::Read(e.to_string()))?;
        Ok(clamp_u64(score))
    }

    /// Current head block number of the connected node.
    pub async fn latest_block(&self) -> Result<u64, LedgerError> {
        let block = self
            .contract
            .client()
            .get_block_number()
            .await
            .map_err(|e| LedgerError::Read(e.to_string()))?;
        Ok(block.as_u64())
    }

    /// `ReportSubmitted` events in `[from_block, to_block]`, in the order
    /// the node returns them.
    pub async fn report_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ReportSubmittedEvent>, LedgerError> {
        let raw = self
            .contract
            .event::<ReportSubmittedFilter>()
            .from_block(from_block)
            .to_block(to_block)
            .query()
            .await
            .map_err(|e| LedgerError::Read(e.to_string()))?;
        Ok(raw.into_iter().map(Into::into).collect())
    }

    /// `TokensAwarded` events in `[from_block, to_block]`.
    pub async fn token_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<TokensAwardedEvent>, LedgerError> {
        let raw = self
            .contract
            .event::<TokensAwardedFilter>()
            .from_block(from_block)
            .to_block(to_block)
            .query()
            .await
            .map_err(|e| LedgerError::Read(e.to_string()))?;
        Ok(raw.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LedgerConfig {
        LedgerConfig {
            rpc_url: "http://127.0.0.1:8545".into(),
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".into(),
            signing_key: "4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d"
                .into(),
            chain_id: 31337,
        }
    }

    #[test]
    fn construction_does_not_touch_the_network() {
        let client = LedgerClient::new(&config()).unwrap();
        assert_eq!(
            client.contract_address(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        assert!(client.sender_address().starts_with("0x"));
    }

    #[test]
    fn malformed_contract_address_is_a_config_error() {
        let mut cfg = config();
        cfg.contract_address = "not-an-address".into();
        assert!(matches!(
            LedgerClient::new(&cfg),
            Err(LedgerError::Config(_))
        ));
    }

    #[test]
    fn malformed_signing_key_is_a_config_error() {
        let mut cfg = config();
        cfg.signing_key = "zz".into();
        assert!(matches!(
            LedgerClient::new(&cfg),
            Err(LedgerError::Config(_))
        ));
    }

    #[test]
    fn malformed_rpc_url_is_a_config_error() {
        let mut cfg = config();
        cfg.rpc_url = "not a url".into();
        assert!(matches!(
            LedgerClient::new(&cfg),
            Err(LedgerError::Config(_))
        ));
    }
}
