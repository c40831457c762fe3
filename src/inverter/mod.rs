pub mod client;
pub mod extract;
pub mod locator;
pub mod types;

pub use client::InverterClient;
pub use extract::{FieldExtractor, FieldValue};
pub use locator::{device_layout, Locator, LocatorTree};
pub use types::{StringReading, TelemetrySnapshot};

use crate::config::InverterConfig;
use crate::error::Result;
use tracing::debug;

/// Fetch, extract and build in one step
///
/// Shared by the poll loop and the live `/pv` read. Neither path touches the
/// other's state through this type.
pub struct Inverter {
    client: InverterClient,
    extractor: FieldExtractor,
}

impl Inverter {
    pub fn new(client: InverterClient, extractor: FieldExtractor) -> Self {
        Self { client, extractor }
    }

    /// Client and extractor for the stock firmware layout
    pub fn from_config(config: &InverterConfig) -> Result<Self> {
        Ok(Self::new(
            InverterClient::new(config)?,
            FieldExtractor::new(&device_layout())?,
        ))
    }

    pub fn client(&self) -> &InverterClient {
        &self.client
    }

    pub async fn read_snapshot(&self) -> Result<TelemetrySnapshot> {
        let html = self.client.fetch_page().await?;
        debug!(bytes = html.len(), "Fetched inverter status page");

        let values = self.extractor.resolve(&html)?;
        TelemetrySnapshot::from_values(&values)
    }
}
