//! Shared test helpers: fixture pages and a local stand-in for the inverter

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use pv_exporter::config::InverterConfig;
use pv_exporter::inverter::{device_layout, FieldExtractor, Inverter, InverterClient};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PAGE: &str = include_str!("../fixtures/index.fhtml");
pub const PAGE_PLACEHOLDER: &str = include_str!("../fixtures/index_placeholder.fhtml");
pub const PAGE_MISSING_ROW: &str = include_str!("../fixtures/index_missing_row.fhtml");
pub const PAGE_NIGHT: &str = include_str!("../fixtures/index_night.fhtml");

#[derive(Clone)]
struct Shared {
    response: Arc<Mutex<(StatusCode, String)>>,
    last_headers: Arc<Mutex<Option<HeaderMap>>>,
    hits: Arc<AtomicUsize>,
    delay: Arc<Mutex<Duration>>,
}

/// Local HTTP server answering `/index.fhtml` like the inverter would
pub struct FakeInverter {
    pub url: String,
    shared: Shared,
}

impl FakeInverter {
    pub async fn start(page: &str) -> Self {
        let shared = Shared {
            response: Arc::new(Mutex::new((StatusCode::OK, page.to_string()))),
            last_headers: Arc::new(Mutex::new(None)),
            hits: Arc::new(AtomicUsize::new(0)),
            delay: Arc::new(Mutex::new(Duration::ZERO)),
        };

        let app = Router::new()
            .route("/index.fhtml", get(page_handler))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake inverter");
        let addr = listener.local_addr().expect("No local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: format!("http://{}/index.fhtml", addr),
            shared,
        }
    }

    /// Changes what the next requests receive
    pub fn respond_with(&self, status: StatusCode, body: &str) {
        *self.shared.response.lock().unwrap() = (status, body.to_string());
    }

    /// Holds every following response for `delay` before answering
    pub fn respond_after(&self, delay: Duration) {
        *self.shared.delay.lock().unwrap() = delay;
    }

    pub fn hits(&self) -> usize {
        self.shared.hits.load(Ordering::SeqCst)
    }

    pub fn last_headers(&self) -> Option<HeaderMap> {
        self.shared.last_headers.lock().unwrap().clone()
    }

    pub fn config(&self) -> InverterConfig {
        InverterConfig {
            url: self.url.clone(),
            ..InverterConfig::default()
        }
    }

    pub fn inverter(&self) -> Arc<Inverter> {
        let client = InverterClient::new(&self.config()).expect("Failed to build client");
        let extractor = FieldExtractor::new(&device_layout()).expect("Invalid device layout");
        Arc::new(Inverter::new(client, extractor))
    }
}

async fn page_handler(State(shared): State<Shared>, headers: HeaderMap) -> (StatusCode, String) {
    shared.hits.fetch_add(1, Ordering::SeqCst);
    *shared.last_headers.lock().unwrap() = Some(headers);
    let delay = *shared.delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let response = shared.response.lock().unwrap().clone();
    response
}

/// Inverter config pointing at a port nothing listens on
pub fn unreachable_config() -> InverterConfig {
    InverterConfig {
        url: "http://127.0.0.1:1/index.fhtml".to_string(),
        ..InverterConfig::default()
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
