//! Shutdown plumbing for the daemon's long-running tasks.
//!
//! The daemon runs three tasks that must stop together: the two listener
//! polling loops and the API server. A broadcast channel fans the stop
//! signal out to them. Every task subscribes before it is spawned — a
//! receiver created after the signal fires never sees it.

use tokio::signal;
use tokio::sync::broadcast;

/// Fan-out handle for the stop signal.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for one task. Must be taken before the task starts.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// The raw sender, for subsystems that subscribe once per spawned task.
    pub fn sender(&self) -> &broadcast::Sender<()> {
        &self.tx
    }

    /// Send the stop signal to every live subscriber.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

/// Resolves when the process receives SIGINT or SIGTERM.
pub async fn wait_for_signal() {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = signal::ctrl_c() => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn trigger_reaches_every_live_subscriber() {
        let shutdown = Shutdown::new();
        // One receiver per task, the way main() wires them.
        let mut listener_rx = shutdown.sender().subscribe();
        let mut server_rx = shutdown.subscribe();

        shutdown.trigger();

        assert!(listener_rx.recv().await.is_ok());
        assert!(server_rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn late_subscriber_misses_an_earlier_trigger() {
        // Pins the ordering constraint: tasks must subscribe before the
        // signal can fire, because a late receiver starts past it.
        let shutdown = Shutdown::new();
        let _early = shutdown.subscribe();
        shutdown.trigger();

        let mut late = shutdown.subscribe();
        let result = tokio::time::timeout(Duration::from_millis(50), late.recv()).await;
        assert!(result.is_err(), "late receiver must not observe the old signal");
    }
}
