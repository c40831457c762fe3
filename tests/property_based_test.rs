//! Property-based tests using proptest
//!
//! Tests that verify properties hold for arbitrary inputs.

use proptest::prelude::*;
use pv_exporter::inverter::extract::normalize;
use pv_exporter::inverter::{StringReading, TelemetrySnapshot};
use pv_exporter::metrics::MetricsCollector;
use pv_exporter::publisher::{parse_reading, publish_snapshot};

/// Helper to create a test metrics instance
fn create_test_metrics() -> MetricsCollector {
    MetricsCollector::new().expect("Failed to create metrics")
}

fn snapshot(watt: f64, s1: (f64, f64), s2: (f64, f64), energy: f64) -> TelemetrySnapshot {
    TelemetrySnapshot {
        watt: watt.to_string(),
        status: "Netz".to_string(),
        string_eins: StringReading {
            spannung: s1.0.to_string(),
            strom: s1.1.to_string(),
        },
        string_zwei: StringReading {
            spannung: s2.0.to_string(),
            strom: s2.1.to_string(),
        },
        tagesenergie: energy.to_string(),
    }
}

proptest! {
    #[test]
    fn test_string_power_is_voltage_times_current(
        voltage in 0.0f64..1000.0,
        current in 0.0f64..50.0,
    ) {
        // Given: Arbitrary non-negative readings on both strings
        let metrics = create_test_metrics();
        let snap = snapshot(0.0, (voltage, current), (current, voltage), 0.0);

        // When: Publishing
        publish_snapshot(&metrics, &snap).unwrap();

        // Then: Power equals the product of the published voltage and current
        let s1 = metrics.watt.with_label_values(&["s1"]).get();
        let s2 = metrics.watt.with_label_values(&["s2"]).get();
        prop_assert!((s1 - voltage * current).abs() <= 1e-9 * (1.0 + s1.abs()));
        prop_assert!((s2 - voltage * current).abs() <= 1e-9 * (1.0 + s2.abs()));
        prop_assert_eq!(metrics.spannung.with_label_values(&["s1"]).get(), voltage);
        prop_assert_eq!(metrics.strom.with_label_values(&["s1"]).get(), current);
    }

    #[test]
    fn test_zero_current_means_zero_power(voltage in 0.0f64..1000.0) {
        let metrics = create_test_metrics();
        let snap = snapshot(0.0, (voltage, 0.0), (0.0, voltage), 0.0);

        publish_snapshot(&metrics, &snap).unwrap();

        prop_assert_eq!(metrics.watt.with_label_values(&["s1"]).get(), 0.0);
        prop_assert_eq!(metrics.watt.with_label_values(&["s2"]).get(), 0.0);
    }

    #[test]
    fn test_daily_energy_scaled_to_watt_hours(kwh in 0.0f64..1000.0) {
        let metrics = create_test_metrics();

        publish_snapshot(&metrics, &snapshot(0.0, (0.0, 0.0), (0.0, 0.0), kwh)).unwrap();

        prop_assert_eq!(metrics.heute.get(), kwh * 1000.0);
    }

    #[test]
    fn test_total_watt_published_verbatim(watt in 0u32..20_000) {
        let metrics = create_test_metrics();

        publish_snapshot(&metrics, &snapshot(f64::from(watt), (0.0, 0.0), (0.0, 0.0), 0.0)).unwrap();

        prop_assert_eq!(metrics.watt.with_label_values(&["total"]).get(), f64::from(watt));
    }

    #[test]
    fn test_any_snapshot_renders_without_panic(
        watt in 0.0f64..1e6,
        kwh in 0.0f64..1e4,
    ) {
        let metrics = create_test_metrics();
        publish_snapshot(&metrics, &snapshot(watt, (1.0, 1.0), (1.0, 1.0), kwh)).unwrap();

        prop_assert!(metrics.render().is_ok());
    }

    #[test]
    fn test_normalize_removes_whitespace_around_numbers(
        value in 0.0f64..1e5,
        left in "[ \t\n]{0,8}",
        right in "[ \t\n]{0,8}",
    ) {
        let raw = format!("{left}{value}{right}");

        let normalized = normalize(&raw);

        prop_assert_eq!(parse_reading("watt", &normalized).unwrap(), value);
        prop_assert!(!normalized.chars().any(char::is_whitespace));
    }

    #[test]
    fn test_normalize_never_leaves_lone_placeholder(padding in "[ \t\n]{0,8}") {
        let raw = format!("{padding}xxx{padding}");

        prop_assert_eq!(normalize(&raw), "0");
    }
}
