//! Prometheus Metrics Definitions
//!
//! This module defines all Prometheus metrics exposed by the PV exporter.
//!
//! # Metrics
//!
//! - `pv_watt{part}` - Output power in watts. `part="total"` is the inverter's own
//!   figure, `part="s1"`/`"s2"` are derived per string from voltage and current.
//! - `pv_spannung{part}` - String voltage in volts (`s1`, `s2`)
//! - `pv_strom{part}` - String current in amperes (`s1`, `s2`)
//! - `pv_heute` - Energy produced today in watt-hours
//!
//! On Linux the registry also carries the standard `process_*` metrics.
//!
//! All gauges are overwritten on every poll; nothing accumulates.

use prometheus::{Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Label name distinguishing the total from the individual strings
pub const PART_LABEL: &str = "part";

/// Metrics collector for the inverter
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,

    pub watt: Arc<GaugeVec>,
    pub spannung: Arc<GaugeVec>,
    pub strom: Arc<GaugeVec>,
    pub heute: Arc<Gauge>,
}

impl MetricsCollector {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let watt = GaugeVec::new(
            Opts::new("watt", "Watt gesamt").namespace("pv"),
            &[PART_LABEL],
        )?;

        let spannung = GaugeVec::new(
            Opts::new("spannung", "Volt gesamt").namespace("pv"),
            &[PART_LABEL],
        )?;

        let strom = GaugeVec::new(
            Opts::new("strom", "Ampere gesamt").namespace("pv"),
            &[PART_LABEL],
        )?;

        let heute = Gauge::with_opts(Opts::new("heute", "Watt heute gesamt").namespace("pv"))?;

        registry.register(Box::new(watt.clone()))?;
        registry.register(Box::new(spannung.clone()))?;
        registry.register(Box::new(strom.clone()))?;
        registry.register(Box::new(heute.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry: Arc::new(registry),
            watt: Arc::new(watt),
            spannung: Arc::new(spannung),
            strom: Arc::new(strom),
            heute: Arc::new(heute),
        })
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics collector")
    }
}
