//! The polling loops.
//!
//! One loop per event kind, spawned as independent tokio tasks. Each cycle
//! is `IDLE → FETCHING → APPLYING → IDLE`; a fetch failure logs, sleeps the
//! error backoff and returns to `IDLE` without touching the other loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use phishnet_ledger::{LedgerClient, ReportSubmittedEvent};
use phishnet_store::{CheckpointStore, ReportStore, ReputationStore, TokenStore};
use phishnet_types::DomainReputation;
use phishnet_utils::unix_timestamp_secs;

use crate::apply;
use crate::ListenerError;

/// Tunables for the polling loops.
#[derive(Clone, Copy, Debug)]
pub struct ListenerConfig {
    /// Sleep between poll cycles.
    pub poll_interval: Duration,
    /// Extra sleep after a failed cycle before returning to idle.
    pub error_backoff: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            error_backoff: Duration::from_secs(5),
        }
    }
}

/// Owns the store handles and the ledger client shared by both loops.
///
/// The loops share no mutable state with each other — all writes go through
/// the (internally transactional) stores.
#[derive(Clone)]
pub struct EventListener {
    ledger: Arc<LedgerClient>,
    reports: Arc<dyn ReportStore>,
    reputations: Arc<dyn ReputationStore>,
    tokens: Arc<dyn TokenStore>,
    checkpoint: Arc<dyn CheckpointStore>,
    config: ListenerConfig,
}

impl EventListener {
    pub fn new(
        ledger: Arc<LedgerClient>,
        reports: Arc<dyn ReportStore>,
        reputations: Arc<dyn ReputationStore>,
        tokens: Arc<dyn TokenStore>,
        checkpoint: Arc<dyn CheckpointStore>,
        config: ListenerConfig,
    ) -> Self {
        Self {
            ledger,
            reports,
            reputations,
            tokens,
            checkpoint,
            config,
        }
    }

    /// Spawn both polling tasks. Each terminates when the shutdown channel
    /// fires; the returned handles resolve once the loops have exited.
    pub fn spawn(
        &self,
        shutdown: &broadcast::Sender<()>,
    ) -> (JoinHandle<()>, JoinHandle<()>) {
        let reports_task = {
            let listener = self.clone();
            let rx = shutdown.subscribe();
            tokio::spawn(async move { listener.run_report_loop(rx).await })
        };
        let tokens_task = {
            let listener = self.clone();
            let rx = shutdown.subscribe();
            tokio::spawn(async move { listener.run_token_loop(rx).await })
        };
        (reports_task, tokens_task)
    }

    async fn run_report_loop(&self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!("report listener started");
        match self.checkpoint.last_hash() {
            Ok(last) if !last.is_empty() => {
                tracing::info!(last_hash = %last, "resuming after checkpoint")
            }
            Ok(_) => tracing::info!("no checkpoint yet, starting fresh"),
            Err(e) => tracing::warn!("checkpoint read failed: {e}"),
        }

        // No historical replay: the window starts at the head observed on
        // the first successful cycle.
        let mut cursor: Option<u64> = None;
        loop {
            if !sleep_or_shutdown(self.config.poll_interval, &mut shutdown).await {
                break;
            }
            match self.poll_reports_once(&mut cursor).await {
                Ok(0) => {}
                Ok(n) => tracing::debug!(count = n, "report events applied"),
                Err(e) => {
                    tracing::warn!("report poll cycle failed: {e}");
                    if !sleep_or_shutdown(self.config.error_backoff, &mut shutdown).await {
                        break;
                    }
                }
            }
        }
        tracing::info!("report listener stopped");
    }

    async fn run_token_loop(&self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!("token listener started");
        let mut cursor: Option<u64> = None;
        loop {
            if !sleep_or_shutdown(self.config.poll_interval, &mut shutdown).await {
                break;
            }
            match self.poll_tokens_once(&mut cursor).await {
                Ok(0) => {}
                Ok(n) => tracing::debug!(count = n, "token events applied"),
                Err(e) => {
                    tracing::warn!("token poll cycle failed: {e}");
                    if !sleep_or_shutdown(self.config.error_backoff, &mut shutdown).await {
                        break;
                    }
                }
            }
        }
        tracing::info!("token listener stopped");
    }

    /// One report poll cycle: fetch the `[cursor, head]` window, apply in
    /// ledger order, then advance the cursor and the checkpoint.
    async fn poll_reports_once(&self, cursor: &mut Option<u64>) -> Result<usize, ListenerError> {
        let head = self.ledger.latest_block().await?;
        let from = match *cursor {
            Some(from) => from,
            None => {
                // First successful cycle: only events from now on.
                *cursor = Some(head + 1);
                return Ok(0);
            }
        };
        if head < from {
            return Ok(0);
        }

        let events = self.ledger.report_events(from, head).await?;
        let mut last_applied: Option<ReportSubmittedEvent> = None;
        for event in &events {
            let created =
                apply::apply_report_submitted(self.reports.as_ref(), event, unix_timestamp_secs())?;
            if created {
                self.refresh_domain_reputation(event).await;
            }
            last_applied = Some(event.clone());
        }

        if let Some(event) = last_applied {
            // Re-applying the same window later would rewrite the same
            // value, so checkpoint advancement stays idempotent.
            self.checkpoint.set_last_hash(&event.report_hash.to_hex())?;
        }
        *cursor = Some(head + 1);
        Ok(events.len())
    }

    /// One token poll cycle, same window discipline as reports.
    async fn poll_tokens_once(&self, cursor: &mut Option<u64>) -> Result<usize, ListenerError> {
        let head = self.ledger.latest_block().await?;
        let from = match *cursor {
            Some(from) => from,
            None => {
                *cursor = Some(head + 1);
                return Ok(0);
            }
        };
        if head < from {
            return Ok(0);
        }

        let events = self.ledger.token_events(from, head).await?;
        for event in &events {
            apply::apply_tokens_awarded(self.tokens.as_ref(), event)?;
        }
        *cursor = Some(head + 1);
        Ok(events.len())
    }

    /// Aggregation step: pull the domain's current reputation from contract
    /// state into the mirror. Best-effort — a read failure is logged and
    /// skipped, never failing the cycle.
    async fn refresh_domain_reputation(&self, event: &ReportSubmittedEvent) {
        let domain = event.domain_hash.to_hex();
        match self.ledger.get_domain_reputation(&event.domain_hash).await {
            Ok(score) => {
                let record =
                    DomainReputation::new(domain.clone(), score as f64, unix_timestamp_secs());
                if let Err(e) = self.reputations.put_domain(&record) {
                    tracing::warn!(%domain, "reputation mirror write failed: {e}");
                }
            }
            Err(e) => tracing::warn!(%domain, "reputation refresh skipped: {e}"),
        }
    }
}

/// Sleep that aborts early on shutdown. Returns `false` when the loop
/// should exit.
async fn sleep_or_shutdown(duration: Duration, shutdown: &mut broadcast::Receiver<()>) -> bool {
    tokio::select! {
        _ = shutdown.recv() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishnet_ledger::LedgerConfig;
    use phishnet_store_lmdb::LmdbEnvironment;

    fn listener(env: &LmdbEnvironment) -> EventListener {
        // Points at a closed port — every RPC cycle fails, which is exactly
        // what the loop must survive.
        let config = LedgerConfig {
            rpc_url: "http://127.0.0.1:9".into(),
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".into(),
            signing_key: "4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d"
                .into(),
            chain_id: 31337,
        };
        let ledger = Arc::new(LedgerClient::new(&config).unwrap());
        EventListener::new(
            ledger,
            Arc::new(env.report_store()),
            Arc::new(env.reputation_store()),
            Arc::new(env.token_store()),
            Arc::new(env.checkpoint_store()),
            ListenerConfig {
                poll_interval: Duration::from_millis(10),
                error_backoff: Duration::from_millis(10),
            },
        )
    }

    #[tokio::test]
    async fn both_loops_stop_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open_with_map_size(dir.path(), 1 << 22).unwrap();
        let (tx, _) = broadcast::channel(1);

        let (reports, tokens) = listener(&env).spawn(&tx);
        // Let at least one (failing) cycle run, then signal shutdown.
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(()).unwrap();

        tokio::time::timeout(Duration::from_secs(5), async {
            reports.await.unwrap();
            tokens.await.unwrap();
        })
        .await
        .expect("loops must exit promptly after shutdown");
    }

    #[tokio::test]
    async fn failing_cycles_do_not_kill_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open_with_map_size(dir.path(), 1 << 22).unwrap();
        let (tx, _) = broadcast::channel(1);

        let (reports, tokens) = listener(&env).spawn(&tx);
        // Several error cycles worth of time.
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(!reports.is_finished());
        assert!(!tokens.is_finished());

        tx.send(()).unwrap();
        let _ = reports.await;
        let _ = tokens.await;
    }
}
