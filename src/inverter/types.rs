//! Inverter Telemetry Types
//!
//! Values are kept as the strings read from the page so `/pv` can expose them
//! verbatim. Numeric coercion happens in the publisher.
//!
//! Serialized key names follow the status page's own vocabulary:
//! `watt`, `status`, `StringEins`, `StringZwei`, `spannung`, `strom`, `tagesenergie`.

use super::extract::FieldValue;
use crate::error::{ExporterError, Result};
use serde::{Deserialize, Serialize};

/// Voltage and current of one string of panels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringReading {
    /// Volts
    pub spannung: String,
    /// Amperes
    pub strom: String,
}

impl Default for StringReading {
    fn default() -> Self {
        Self {
            spannung: "0".to_string(),
            strom: "0".to_string(),
        }
    }
}

/// One complete reading of the status page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Current total output in watts
    pub watt: String,
    /// Operating state as printed by the firmware, e.g. `Netz` or `Aus`
    pub status: String,
    #[serde(rename = "StringEins")]
    pub string_eins: StringReading,
    #[serde(rename = "StringZwei")]
    pub string_zwei: StringReading,
    /// Energy produced today in kWh
    pub tagesenergie: String,
}

/// Placeholder used until the first successful poll: everything zero, inverter `Aus`
impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self {
            watt: "0".to_string(),
            status: "Aus".to_string(),
            string_eins: StringReading::default(),
            string_zwei: StringReading::default(),
            tagesenergie: "0".to_string(),
        }
    }
}

impl TelemetrySnapshot {
    /// Builds a snapshot from a value tree resolved with the device layout
    pub fn from_values(values: &FieldValue) -> Result<Self> {
        let leaf = |path: &str| {
            values
                .lookup(path)
                .map(str::to_string)
                .ok_or_else(|| ExporterError::MissingField(path.to_string()))
        };

        Ok(Self {
            watt: leaf("watt")?,
            status: leaf("status")?,
            string_eins: StringReading {
                spannung: leaf("StringEins.spannung")?,
                strom: leaf("StringEins.strom")?,
            },
            string_zwei: StringReading {
                spannung: leaf("StringZwei.spannung")?,
                strom: leaf("StringZwei.strom")?,
            },
            tagesenergie: leaf("tagesenergie")?,
        })
    }
}
