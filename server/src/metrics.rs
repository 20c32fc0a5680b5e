//! # Prometheus Metrics
//!
//! Operational metrics for the API server, scraped at `/metrics` on the
//! configured metrics port.
//!
//! All metrics are registered in a dedicated [`prometheus::Registry`] so
//! they do not collide with any default global registry consumers.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the server.
///
/// Clone-friendly (wraps `Arc` internally via prometheus handles) so it
/// can be shared across request handlers.
#[derive(Clone)]
pub struct ServerMetrics {
    /// Prometheus registry that owns all metrics below.
    registry: Registry,
    /// Total transaction searches attempted.
    pub searches_total: IntCounter,
    /// Total generic NVP calls attempted via `/api/nvp/execute`.
    pub nvp_calls_total: IntCounter,
    /// Responses where the transport succeeded but the provider answered
    /// with a failing ACK.
    pub provider_failures_total: IntCounter,
    /// Requests that failed at the HTTP or network layer.
    pub transport_failures_total: IntCounter,
    /// Histogram of round-trip latency to the NVP endpoint in seconds.
    pub nvp_latency_seconds: Histogram,
}

impl ServerMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("paylens".into()), None)
            .expect("failed to create prometheus registry");

        let searches_total = IntCounter::new(
            "searches_total",
            "Total transaction searches attempted",
        )
        .expect("metric creation");
        registry
            .register(Box::new(searches_total.clone()))
            .expect("metric registration");

        let nvp_calls_total = IntCounter::new(
            "nvp_calls_total",
            "Total generic NVP calls attempted",
        )
        .expect("metric creation");
        registry
            .register(Box::new(nvp_calls_total.clone()))
            .expect("metric registration");

        let provider_failures_total = IntCounter::new(
            "provider_failures_total",
            "Responses with a failing provider-level ACK",
        )
        .expect("metric creation");
        registry
            .register(Box::new(provider_failures_total.clone()))
            .expect("metric registration");

        let transport_failures_total = IntCounter::new(
            "transport_failures_total",
            "Requests that failed at the HTTP or network layer",
        )
        .expect("metric creation");
        registry
            .register(Box::new(transport_failures_total.clone()))
            .expect("metric registration");

        let nvp_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "nvp_latency_seconds",
                "Round-trip latency to the NVP endpoint in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )
        .expect("metric creation");
        registry
            .register(Box::new(nvp_latency_seconds.clone()))
            .expect("metric registration");

        Self {
            registry,
            searches_total,
            nvp_calls_total,
            provider_failures_total,
            transport_failures_total,
            nvp_latency_seconds,
        }
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer).expect("prometheus output is valid utf-8"))
    }
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<ServerMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
///
/// Returns HTTP 500 if encoding fails (should never happen in practice).
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
