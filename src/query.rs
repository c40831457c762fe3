//! Read access for HTTP callers
//!
//! Two paths with different failure scope:
//!
//! - [`Telemetry::cached`] returns the poll loop's last successful snapshot. It
//!   never fails and never waits on the inverter.
//! - [`Telemetry::live`] reads the inverter right now. Errors go back to the
//!   caller only; the cache and the poll loop are untouched.

use crate::cache::SnapshotCache;
use crate::error::Result;
use crate::inverter::{Inverter, TelemetrySnapshot};
use std::sync::Arc;

#[derive(Clone)]
pub struct Telemetry {
    inverter: Arc<Inverter>,
    cache: SnapshotCache,
}

impl Telemetry {
    pub fn new(inverter: Arc<Inverter>, cache: SnapshotCache) -> Self {
        Self { inverter, cache }
    }

    pub fn cached(&self) -> Arc<TelemetrySnapshot> {
        self.cache.latest()
    }

    pub async fn live(&self) -> Result<TelemetrySnapshot> {
        self.inverter.read_snapshot().await
    }
}
