//! phishnet daemon — entry point for running the registry backend.

mod config;
mod shutdown;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use phishnet_classifier::ClassifierClient;
use phishnet_ledger::{LedgerClient, LedgerConfig};
use phishnet_listener::{EventListener, ListenerConfig};
use phishnet_rpc::{ApiState, RpcServer};
use phishnet_store_lmdb::LmdbEnvironment;

use config::DaemonConfig;
use shutdown::Shutdown;

#[derive(Parser)]
#[command(name = "phishnet-daemon", about = "Phishing-report registry backend")]
struct Cli {
    /// Data directory for the LMDB mirror.
    #[arg(long, env = "PHISHNET_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// API server port.
    #[arg(long, env = "PHISHNET_RPC_PORT")]
    rpc_port: Option<u16>,

    /// Seconds between listener poll cycles.
    #[arg(long, env = "PHISHNET_POLL_INTERVAL")]
    poll_interval_secs: Option<u64>,

    /// Endpoint of the external scoring service.
    #[arg(long, env = "PHISHNET_CLASSIFIER_URL")]
    classifier_url: Option<String>,

    /// API key for the external scoring service.
    #[arg(long, env = "PHISHNET_CLASSIFIER_API_KEY", hide_env_values = true)]
    classifier_api_key: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "PHISHNET_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config: DaemonConfig = match &cli.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("read config file {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("parse config file {}", path.display()))?
        }
        None => DaemonConfig::default(),
    };

    let config = DaemonConfig {
        data_dir: cli.data_dir.unwrap_or(file_config.data_dir),
        rpc_port: cli.rpc_port.unwrap_or(file_config.rpc_port),
        poll_interval_secs: cli
            .poll_interval_secs
            .unwrap_or(file_config.poll_interval_secs),
        error_backoff_secs: file_config.error_backoff_secs,
        classifier_url: cli.classifier_url.unwrap_or(file_config.classifier_url),
        log_level: cli.log_level.unwrap_or(file_config.log_level),
    };

    phishnet_utils::init_tracing(&config.log_level);

    // Ledger configuration is required up front — a missing variable aborts
    // startup instead of failing on the first request.
    let ledger_config = LedgerConfig::from_env().context("ledger configuration")?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        rpc_port = config.rpc_port,
        poll_interval_secs = config.poll_interval_secs,
        "starting phishnet daemon"
    );

    let env = LmdbEnvironment::open(&config.data_dir)
        .with_context(|| format!("open mirror storage at {}", config.data_dir.display()))?;
    let ledger = Arc::new(LedgerClient::new(&ledger_config).context("ledger client")?);
    let classifier = Arc::new(ClassifierClient::new(
        config.classifier_url.clone(),
        cli.classifier_api_key,
    ));

    let shutdown = Shutdown::new();

    let listener = EventListener::new(
        ledger.clone(),
        Arc::new(env.report_store()),
        Arc::new(env.reputation_store()),
        Arc::new(env.token_store()),
        Arc::new(env.checkpoint_store()),
        ListenerConfig {
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            error_backoff: Duration::from_secs(config.error_backoff_secs),
        },
    );
    let (reports_task, tokens_task) = listener.spawn(shutdown.sender());

    let state = Arc::new(ApiState {
        ledger,
        reports: Arc::new(env.report_store()),
        reputations: Arc::new(env.reputation_store()),
        tokens: Arc::new(env.token_store()),
        checkpoint: Arc::new(env.checkpoint_store()),
        classifier,
    });
    let server = RpcServer::new(config.rpc_port);
    let server_rx = shutdown.subscribe();
    let mut server_task = tokio::spawn(async move { server.serve(state, server_rx).await });

    // Run until a signal arrives or the server dies on its own.
    let server_outcome = tokio::select! {
        _ = shutdown::wait_for_signal() => None,
        result = &mut server_task => Some(result),
    };
    shutdown.trigger();

    reports_task.await.context("join report listener")?;
    tokens_task.await.context("join token listener")?;
    match server_outcome {
        Some(result) => result.context("join API server")??,
        None => server_task.await.context("join API server")??,
    }

    tracing::info!("phishnet daemon exited cleanly");
    Ok(())
}
