//! Poll Loop
//!
//! Reads the inverter on a fixed cadence, publishes the gauges and updates the
//! last-known snapshot.
//!
//! # Failure Policy
//!
//! Fail-fast. The first error in any cycle ends [`Poller::run`], and the binary
//! exits non-zero so the supervisor (systemd, Docker, Kubernetes) restarts it.
//! The inverter firmware has been seen to wedge and keep timing out until the
//! client process is restarted; retrying in-process does not recover it.
//!
//! # Cadence
//!
//! The interval is measured from the start of each cycle. Cycles never overlap:
//! a cycle that runs longer than the interval delays the next tick.

use crate::cache::SnapshotWriter;
use crate::error::Result;
use crate::inverter::{Inverter, TelemetrySnapshot};
use crate::metrics::MetricsCollector;
use crate::publisher::publish_snapshot;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::info;

pub struct Poller {
    inverter: Arc<Inverter>,
    metrics: MetricsCollector,
    cache: SnapshotWriter,
    period: Duration,
}

impl Poller {
    pub fn new(
        inverter: Arc<Inverter>,
        metrics: MetricsCollector,
        cache: SnapshotWriter,
        period: Duration,
    ) -> Self {
        Self {
            inverter,
            metrics,
            cache,
            period,
        }
    }

    /// Fetch, extract, publish, then cache. The cache is only written after
    /// every other step succeeded.
    pub async fn run_cycle(&self) -> Result<Arc<TelemetrySnapshot>> {
        let snapshot = Arc::new(self.inverter.read_snapshot().await?);
        publish_snapshot(&self.metrics, &snapshot)?;
        self.cache.replace(snapshot.clone());

        info!(
            watt = %snapshot.watt,
            status = %snapshot.status,
            s1_spannung = %snapshot.string_eins.spannung,
            s1_strom = %snapshot.string_eins.strom,
            s2_spannung = %snapshot.string_zwei.spannung,
            s2_strom = %snapshot.string_zwei.strom,
            tagesenergie = %snapshot.tagesenergie,
            "Updated PV metrics"
        );

        Ok(snapshot)
    }

    /// Runs cycles until one fails. Only ever returns the failure.
    pub async fn run(self) -> Result<Infallible> {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            url = self.inverter.client().url(),
            interval_seconds = self.period.as_secs(),
            "Polling inverter"
        );

        loop {
            ticker.tick().await;
            self.run_cycle().await?;
        }
    }
}
