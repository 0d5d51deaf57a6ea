use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

// ------------------------------------------------------------------
// Snapshot
// ------------------------------------------------------------------

/// One complete reading of the node's storage and peer counters.
///
/// A snapshot is either wholly absent or fully populated. Consumers never
/// see a partial one: publishers build the whole struct and swap it in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub bytes_donated: u64,
    pub bytes_indexed: u64,
    pub bytes_needed: u64,
    pub bytes_used_supplier: u64,
    pub bytes_used_total: u64,
    pub customers: u64,
    pub files_count: u64,
    pub folders_count: u64,
    pub items_count: u64,
    pub max_suppliers: u64,
    pub online_suppliers: u64,
    pub suppliers: u64,
    /// Unix seconds the reading was taken, with fractional precision.
    /// Zero marks a snapshot that was never refreshed.
    pub timestamp: f64,
    pub value_donated: String,
    pub value_needed: String,
    pub value_used_total: String,
}

// ------------------------------------------------------------------
// Provider
// ------------------------------------------------------------------

/// Source of the latest snapshot. Returns None until a first reading
/// has been published.
pub trait StatsProvider {
    fn stats(&self) -> Option<Arc<StatsSnapshot>>;
}

impl StatsProvider for Option<Arc<StatsSnapshot>> {
    fn stats(&self) -> Option<Arc<StatsSnapshot>> {
        self.clone()
    }
}

// ------------------------------------------------------------------
// Shared state
// ------------------------------------------------------------------

/// Publisher side of the snapshot channel. The collector owns one and
/// replaces the value wholesale on every refresh.
pub struct SharedStats {
    tx: watch::Sender<Option<Arc<StatsSnapshot>>>,
}

impl SharedStats {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the current snapshot. Returns false once every handle
    /// has been dropped, so publishers know to stop.
    pub fn publish(&self, snapshot: StatsSnapshot) -> bool {
        self.tx.send_replace(Some(Arc::new(snapshot)));
        !self.tx.is_closed()
    }

    pub fn handle(&self) -> StatsHandle {
        StatsHandle {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for SharedStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Reader side. Cheap to clone; each clone observes every replacement.
#[derive(Clone)]
pub struct StatsHandle {
    rx: watch::Receiver<Option<Arc<StatsSnapshot>>>,
}

impl StatsHandle {
    /// Wait for the next published snapshot. Errors when the publisher
    /// is gone.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}

impl StatsProvider for StatsHandle {
    fn stats(&self) -> Option<Arc<StatsSnapshot>> {
        self.rx.borrow().clone()
    }
}
