//! # JSON API
//!
//! Builds the axum router for the activity viewer. All endpoints share
//! application state through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path               | Description                              |
//! |--------|--------------------|------------------------------------------|
//! | GET    | `/health`          | Liveness probe                           |
//! | GET    | `/config`          | Provider configuration (no secrets)      |
//! | GET    | `/api/activity`    | Transaction search over a date window    |
//! | POST   | `/api/nvp/execute` | Generic NVP method call                  |
//!
//! The provider's three failure layers map to three distinct responses:
//! missing credentials is a 400 before any request, a transport failure
//! is a 502, and a provider-level ACK failure is a 400 carrying the
//! provider's own message plus the raw response for debugging.

use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use paylens_nvp::codec::ack::{failure_message, Ack};
use paylens_nvp::config as nvp_config;
use paylens_nvp::{group_indexed, NvpClient, RawResponse, TransactionRecord, TransactionSearch};

use crate::dates;
use crate::metrics::SharedMetrics;
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone — the client and metrics sit behind `Arc`. The client
/// is `None` when credentials were not configured; handlers that need it
/// answer 400 in that case, mirroring the provider-independent endpoints
/// staying up regardless.
#[derive(Clone)]
pub struct AppState {
    /// Resolved provider settings (for `/config`).
    pub settings: Settings,
    /// The NVP client, when credentials are configured.
    pub client: Option<Arc<NvpClient>>,
    /// Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/config", get(config_handler))
        .route("/api/activity", get(activity_handler))
        .route("/api/nvp/execute", post(execute_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/activity`.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Start of the window, `YYYY-MM-DD`.
    pub start_date: String,
    /// End of the window, `YYYY-MM-DD` (inclusive, through end of day).
    pub end_date: String,
    /// Optional counterparty email filter.
    pub email: Option<String>,
    /// Optional provider transaction ID filter.
    pub transaction_id: Option<String>,
}

/// Response payload for `GET /api/activity` on success.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityResponse {
    /// The provider's ACK value.
    pub ack: String,
    /// Number of records returned.
    pub count: usize,
    /// The decoded transaction records, in provider order.
    pub transactions: Vec<TransactionRecord>,
}

/// Response payload for `GET /config`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigResponse {
    /// Configured mode string.
    pub mode: String,
    /// The NVP endpoint in use, when the mode is valid.
    pub endpoint: Option<String>,
    /// The PayPal web host for browser redirects, when the mode is valid.
    pub web_host: Option<String>,
    /// NVP API version sent with requests.
    pub api_version: String,
    /// Whether all three credential strings are configured.
    pub has_credentials: bool,
}

/// Request body for `POST /api/nvp/execute`.
#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    /// The NVP method name, e.g. "TransactionSearch".
    pub method: String,
    /// Method-specific parameters. Reserved identity fields are ignored.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

/// Response payload for `POST /api/nvp/execute`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// The provider's ACK value, when present.
    pub ack: Option<String>,
    /// The full decoded response.
    pub result: RawResponse,
}

/// Response payload when the provider rejects a call (`ACK=Failure`).
#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderErrorResponse {
    /// The failing ACK value.
    pub ack: String,
    /// Human-readable message from the provider.
    pub error: String,
    /// The raw response, for debugging.
    pub raw: RawResponse,
}

/// Generic error body returned by endpoints on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` — returns 200 if the server is alive.
///
/// Intentionally does not probe the provider — that would make liveness
/// depend on a third party.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// `GET /config` — reports the provider configuration without secrets.
async fn config_handler(State(state): State<AppState>) -> impl IntoResponse {
    let parsed = state.settings.parsed_mode().ok();

    Json(ConfigResponse {
        mode: state.settings.mode.clone(),
        endpoint: parsed.map(|mode| mode.endpoint_url().to_string()),
        web_host: parsed.map(|mode| mode.web_host().to_string()),
        api_version: state.settings.version.clone(),
        has_credentials: state.settings.has_credentials(),
    })
}

/// `GET /api/activity` — runs a transaction search over a date window.
///
/// Dates arrive as `YYYY-MM-DD` and are expanded to the full provider
/// timestamp format here; the core client takes them as-is.
async fn activity_handler(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> axum::response::Response {
    let Some(client) = state.client.as_deref() else {
        return error_response(StatusCode::BAD_REQUEST, "Missing PayPal API credentials");
    };

    let start = match dates::day_start_utc(&query.start_date) {
        Ok(ts) => ts,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };
    let end = match dates::day_end_utc(&query.end_date) {
        Ok(ts) => ts,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    let search = TransactionSearch {
        start_date: start,
        end_date: Some(end),
        email: query.email.filter(|v| !v.is_empty()),
        transaction_id: query.transaction_id.filter(|v| !v.is_empty()),
        status: None,
    };

    state.metrics.searches_total.inc();
    let timer = state.metrics.nvp_latency_seconds.start_timer();
    let result = client.transaction_search(&search).await;
    timer.observe_duration();

    let raw = match result {
        Ok(raw) => raw,
        Err(e) => {
            state.metrics.transport_failures_total.inc();
            tracing::warn!("transaction search failed: {}", e);
            return error_response(StatusCode::BAD_GATEWAY, e.to_string());
        }
    };

    let ack = Ack::of(&raw);
    let ack_value = raw.get("ACK").cloned().unwrap_or_default();
    if !ack.is_success() {
        state.metrics.provider_failures_total.inc();
        tracing::warn!(ack = %ack_value, "provider rejected transaction search");
        return (
            StatusCode::BAD_REQUEST,
            Json(ProviderErrorResponse {
                ack: ack_value,
                error: failure_message(&raw),
                raw,
            }),
        )
            .into_response();
    }

    let transactions = group_indexed(&raw, nvp_config::RECORD_GROUP_PREFIX);
    tracing::info!(count = transactions.len(), "transaction search succeeded");
    Json(ActivityResponse {
        ack: ack_value,
        count: transactions.len(),
        transactions,
    })
    .into_response()
}

/// `POST /api/nvp/execute` — calls an arbitrary NVP method.
///
/// The raw response is returned regardless of ACK; interpreting the
/// provider's verdict is left to the caller, who gets the full payload.
async fn execute_handler(
    State(state): State<AppState>,
    Json(request): Json<ExecuteRequest>,
) -> axum::response::Response {
    let Some(client) = state.client.as_deref() else {
        return error_response(StatusCode::BAD_REQUEST, "Missing PayPal API credentials");
    };

    state.metrics.nvp_calls_total.inc();
    let timer = state.metrics.nvp_latency_seconds.start_timer();
    let result = client.call(&request.method, &request.params).await;
    timer.observe_duration();

    match result {
        Ok(raw) => Json(ExecuteResponse {
            ack: raw.get("ACK").cloned(),
            result: raw,
        })
        .into_response(),
        Err(e) => {
            state.metrics.transport_failures_total.inc();
            tracing::warn!(method = %request.method, "nvp call failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
