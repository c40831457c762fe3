//! Last-Known Snapshot Cache
//!
//! One slot holding the most recent successful [`TelemetrySnapshot`]. The slot
//! is split into a single [`SnapshotWriter`], owned by the poll loop, and any
//! number of cloneable [`SnapshotCache`] readers.
//!
//! Snapshots are replaced whole behind an `Arc`, so a reader sees either the old
//! or the new snapshot and never a mix. Reads only clone the `Arc` and do not
//! wait on network I/O.

use crate::inverter::TelemetrySnapshot;
use std::sync::Arc;
use tokio::sync::watch;

/// Creates the cache, seeded with [`TelemetrySnapshot::default`]
pub fn snapshot_cache() -> (SnapshotWriter, SnapshotCache) {
    let (tx, rx) = watch::channel(Arc::new(TelemetrySnapshot::default()));
    (SnapshotWriter { tx }, SnapshotCache { rx })
}

/// Write side of the cache. Not `Clone`: there is exactly one writer.
pub struct SnapshotWriter {
    tx: watch::Sender<Arc<TelemetrySnapshot>>,
}

impl SnapshotWriter {
    /// Replaces the cached snapshot
    pub fn replace(&self, snapshot: Arc<TelemetrySnapshot>) {
        self.tx.send_replace(snapshot);
    }

    pub fn reader(&self) -> SnapshotCache {
        SnapshotCache {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read side of the cache
#[derive(Clone)]
pub struct SnapshotCache {
    rx: watch::Receiver<Arc<TelemetrySnapshot>>,
}

impl SnapshotCache {
    pub fn latest(&self) -> Arc<TelemetrySnapshot> {
        self.rx.borrow().clone()
    }

    pub fn status(&self) -> String {
        self.rx.borrow().status.clone()
    }
}
