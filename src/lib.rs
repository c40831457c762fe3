//! PV Inverter Prometheus Exporter
//!
//! Polls the embedded web status page of a solar inverter, extracts its readings
//! from the HTML and exposes them as Prometheus gauges.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   GET index.fhtml    ┌─────────────────────────┐
//! │  Inverter   │ ◄─────────────────── │        Exporter         │
//! │  web page   │    every 10 s        │                         │      HTTP      ┌────────────┐
//! └─────────────┘                      │ Client → Extractor →    │ ◄────────────► │ Prometheus │
//!                                      │ Snapshot → Publisher    │   /metrics     └────────────┘
//!                                      │            ↓            │
//!                                      │     last-known cache    │ ──► /state, /pv
//!                                      └─────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`inverter`] - Status page client, field locators, HTML extraction, snapshot types
//! - [`publisher`] - Numeric derivation and gauge updates
//! - [`metrics`] - Prometheus metric definitions
//! - [`cache`] - Last-known snapshot slot
//! - [`poller`] - Fail-fast poll loop
//! - [`query`] - Cached and live reads for HTTP callers
//! - [`server`] - HTTP server
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use pv_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod inverter;
pub mod metrics;
pub mod poller;
pub mod publisher;
pub mod query;
pub mod server;
