//! Snapshot Publisher
//!
//! Turns a [`TelemetrySnapshot`] into gauge values. Derived quantities are
//! computed from the snapshot alone:
//!
//! - per-string power = `spannung` × `strom`
//! - `pv_heute` = `tagesenergie` × 1000 (kWh to Wh)
//!
//! Every value is parsed before any gauge is written, so a bad leaf leaves the
//! registry exactly as the previous cycle left it.

use crate::error::{ExporterError, Result};
use crate::inverter::{StringReading, TelemetrySnapshot};
use crate::metrics::MetricsCollector;

/// Parses a leaf as a decimal number. An empty leaf reads as zero.
pub fn parse_reading(field: &str, value: &str) -> Result<f64> {
    if value.is_empty() {
        return Ok(0.0);
    }
    value.parse().map_err(|_| ExporterError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Power of one string in watts
pub fn string_power(voltage: f64, current: f64) -> f64 {
    voltage * current
}

/// Converts the page's kWh figure into watt-hours
pub fn kwh_to_wh(kwh: f64) -> f64 {
    kwh * 1000.0
}

struct StringValues {
    voltage: f64,
    current: f64,
}

impl StringValues {
    fn parse(name: &str, reading: &StringReading) -> Result<Self> {
        Ok(Self {
            voltage: parse_reading(&format!("{name}.spannung"), &reading.spannung)?,
            current: parse_reading(&format!("{name}.strom"), &reading.strom)?,
        })
    }
}

/// Overwrites all inverter gauges with the values from `snapshot`
pub fn publish_snapshot(metrics: &MetricsCollector, snapshot: &TelemetrySnapshot) -> Result<()> {
    let total = parse_reading("watt", &snapshot.watt)?;
    let s1 = StringValues::parse("StringEins", &snapshot.string_eins)?;
    let s2 = StringValues::parse("StringZwei", &snapshot.string_zwei)?;
    let energy = parse_reading("tagesenergie", &snapshot.tagesenergie)?;

    metrics.watt.with_label_values(&["total"]).set(total);

    for (part, values) in [("s1", &s1), ("s2", &s2)] {
        metrics
            .watt
            .with_label_values(&[part])
            .set(string_power(values.voltage, values.current));
        metrics
            .spannung
            .with_label_values(&[part])
            .set(values.voltage);
        metrics.strom.with_label_values(&[part]).set(values.current);
    }

    metrics.heute.set(kwh_to_wh(energy));

    Ok(())
}
