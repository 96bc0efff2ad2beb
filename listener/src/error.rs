use phishnet_ledger::LedgerError;
use phishnet_store::StoreError;
use thiserror::Error;

/// Per-cycle listener failure. Always logged and backed off, never fatal
/// to the polling loop.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
