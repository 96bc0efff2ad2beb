//! Daemon configuration.
//!
//! Ledger credentials come exclusively from the environment (see
//! `phishnet_ledger::LedgerConfig`). Everything else can be set in a TOML
//! file used as the base, with CLI flags and env vars overriding it.

use phishnet_classifier::DEFAULT_CLASSIFIER_URL;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Directory for the LMDB mirror.
    pub data_dir: PathBuf,
    /// Port the API server binds.
    pub rpc_port: u16,
    /// Seconds between listener poll cycles.
    pub poll_interval_secs: u64,
    /// Seconds to back off after a failed poll cycle.
    pub error_backoff_secs: u64,
    /// Endpoint of the external scoring service.
    pub classifier_url: String,
    /// Log level when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./phishnet_data"),
            rpc_port: 8000,
            poll_interval_secs: 2,
            error_backoff_secs: 5,
            classifier_url: DEFAULT_CLASSIFIER_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = DaemonConfig::default();
        assert_eq!(cfg.rpc_port, 8000);
        assert_eq!(cfg.poll_interval_secs, 2);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let cfg: DaemonConfig = toml::from_str("rpc_port = 9001\nlog_level = \"debug\"").unwrap();
        assert_eq!(cfg.rpc_port, 9001);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.poll_interval_secs, 2);
        assert_eq!(cfg.classifier_url, DEFAULT_CLASSIFIER_URL);
    }
}
