use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub inverter: InverterConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InverterConfig {
    /// Status page of the inverter's embedded web server
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_referrer")]
    pub referrer: String,
    /// Sent verbatim as the `authorization` header. The firmware does not check it.
    #[serde(default)]
    pub authorization: Option<SecretString>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_scrape_interval")]
    pub scrape_interval_seconds: u64,
}

fn default_url() -> String {
    "http://192.168.178.200/index.fhtml".to_string()
}

fn default_referrer() -> String {
    "http://192.168.178.200/Info.fhtml".to_string()
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_scrape_interval() -> u64 {
    10
}

impl Default for InverterConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            referrer: default_referrer(),
            authorization: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            scrape_interval_seconds: default_scrape_interval(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("PV_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Applies command-line values on top of the loaded settings. `None` keeps
    /// whatever the file or environment configured.
    pub fn override_server(&mut self, addr: Option<String>, port: Option<u16>) {
        if let Some(addr) = addr {
            self.server.addr = addr;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }
}
