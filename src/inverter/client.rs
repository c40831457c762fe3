//! Inverter Status Page Client
//!
//! Fetches `index.fhtml` from the inverter's embedded web server. The firmware
//! only answers requests that look like they come from its own web UI, so the
//! client sends a browser header set including the referrer of the info page.
//!
//! There is no retry here. A failed request is returned to the caller as
//! [`ExporterError::Network`](crate::error::ExporterError::Network).
//!
//! # Example
//!
//! ```no_run
//! use pv_exporter::config::InverterConfig;
//! use pv_exporter::inverter::InverterClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = InverterClient::new(&InverterConfig::default())?;
//! let html = client.fetch_page().await?;
//! # Ok(())
//! # }
//! ```

use crate::config::InverterConfig;
use crate::error::{ExporterError, Result};
use reqwest::header::{self, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";
const ACCEPT_LANGUAGE: &str = "de-DE,de;q=0.9,en-DE;q=0.8,en;q=0.7,en-US;q=0.6,eu;q=0.5";

/// HTTP client bound to one inverter status page
///
/// Cheap to share behind an `Arc`; `reqwest::Client` pools connections internally.
pub struct InverterClient {
    http: reqwest::Client,
    url: String,
}

impl InverterClient {
    pub fn new(config: &InverterConfig) -> Result<Self> {
        // The inverter sits on the local network; never route it through a proxy
        let http = reqwest::Client::builder()
            .default_headers(default_headers(config)?)
            .no_proxy()
            .build()?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Single GET of the status page, returning the body as text
    pub async fn fetch_page(&self) -> Result<String> {
        let body = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

fn default_headers(config: &InverterConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert(header::REFERER, header_value("referrer", &config.referrer)?);

    if let Some(auth) = &config.authorization {
        let mut value = header_value("authorization", auth.expose_secret())?;
        value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, value);
    }

    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ExporterError::Config(format!("Invalid {} header: {}", name, e)))
}
