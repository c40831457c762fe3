//! HTTP Server and Poll Loop Supervision
//!
//! This module wires the poll loop and the Axum HTTP server together.
//!
//! # Endpoints
//!
//! - `GET /` - Liveness text (`running`)
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /pv` - Fresh reading from the inverter as JSON (500 with `{"error": ...}` on failure)
//! - `GET /state` - Cached inverter status as plain text, readable from any origin
//!
//! # Error Handling
//!
//! A failing `/pv` request only fails that request. A failing poll cycle stops
//! [`start`], which returns the error so the process can exit and be restarted.

use crate::cache::snapshot_cache;
use crate::config::Config;
use crate::error::ExporterError;
use crate::inverter::Inverter;
use crate::metrics::MetricsCollector;
use crate::poller::Poller;
use crate::query::Telemetry;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub metrics: MetricsCollector,
    pub telemetry: Telemetry,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let metrics = MetricsCollector::new()?;
    let inverter = Arc::new(Inverter::from_config(&config.inverter)?);
    let (writer, cache) = snapshot_cache();

    let poller = Poller::new(
        inverter.clone(),
        metrics.clone(),
        writer,
        Duration::from_secs(config.metrics.scrape_interval_seconds),
    );

    let state = AppState {
        metrics,
        telemetry: Telemetry::new(inverter, cache),
    };

    let app = router(state);

    // Start the server
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ExporterError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .into_future();

    tokio::select! {
        result = server => {
            result?;
            info!("Server shut down");
            Ok(())
        }
        result = poller.run() => match result {
            Ok(never) => match never {},
            Err(e) => {
                error!(error = %e, "Polling inverter failed, quitting");
                Err(e.into())
            }
        },
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/pv", get(pv_handler))
        .route("/state", get(state_handler))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

async fn root_handler() -> impl IntoResponse {
    "running"
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(metrics) => (
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            metrics,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn pv_handler(State(state): State<AppState>) -> Response {
    match state.telemetry.live().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => {
            error!(error = %e, "Live inverter read failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn state_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        state.telemetry.cached().status.clone(),
    )
}
