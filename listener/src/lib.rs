//! Event listener: mirrors contract events into local storage.
//!
//! Two independent polling tasks (one per event kind) share nothing but the
//! store handles. Each cycle fetches a block window, applies the events
//! idempotently and advances its cursor; a failing cycle logs, backs off
//! and never kills the loop.

pub mod apply;
pub mod error;
pub mod poller;

pub use error::ListenerError;
pub use poller::{EventListener, ListenerConfig};
