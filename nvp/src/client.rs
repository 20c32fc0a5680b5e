//! # Transaction Client
//!
//! One request/response cycle against the NVP endpoint: build the
//! payload, POST it, decode the body. No retries, no caching, no state
//! beyond the credentials and a pooled HTTP connection — concurrent
//! calls on a shared client are independent.
//!
//! A provider-level rejection (`ACK=Failure`) is *not* an error at this
//! layer. The HTTP exchange worked; the raw response goes back to the
//! caller, who checks the ACK via [`codec::ack`](crate::codec::ack)
//! before parsing records.

use std::time::Duration;

use crate::codec::{build_payload, parse_response, RawResponse, RequestParams};
use crate::config;
use crate::credentials::Credentials;
use crate::error::NvpError;

/// A client bound to one set of credentials and the endpoint their mode
/// selects.
#[derive(Debug, Clone)]
pub struct NvpClient {
    http: reqwest::Client,
    credentials: Credentials,
    endpoint: String,
    timeout: Duration,
}

impl NvpClient {
    /// Creates a client for the credentials' environment with the
    /// standard 30-second request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`NvpError::Transport`] if the underlying HTTP client
    /// cannot be constructed (TLS backend initialization failure).
    pub fn new(credentials: Credentials) -> Result<Self, NvpError> {
        let http = reqwest::Client::builder().build()?;
        let endpoint = credentials.mode.endpoint_url().to_string();
        Ok(Self {
            http,
            credentials,
            endpoint,
            timeout: config::REQUEST_TIMEOUT,
        })
    }

    /// Points the client at a different endpoint URL. Intended for tests
    /// and local proxies; production traffic uses the mode's fixed URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The endpoint URL this client POSTs to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Calls an arbitrary NVP method with the given parameters.
    ///
    /// One POST, one attempt. A non-2xx status fails with
    /// [`NvpError::Status`]; timeouts and connection failures with
    /// [`NvpError::Transport`]. Neither path returns a partial response.
    ///
    /// The parameter mapping is an open string-keyed map — the NVP schema
    /// is not validated at compile time, which matches the wire protocol.
    pub async fn call(
        &self,
        method: &str,
        params: &RequestParams,
    ) -> Result<RawResponse, NvpError> {
        let body = build_payload(method, &self.credentials, params);

        let response = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/x-www-form-urlencoded")
            .timeout(self.timeout)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(NvpError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(parse_response(&text))
    }

    /// Runs a `TransactionSearch` call.
    ///
    /// Returns the raw response so the caller can inspect the ACK before
    /// deciding whether to regroup records with
    /// [`group_indexed`](crate::codec::group_indexed).
    pub async fn transaction_search(
        &self,
        search: &TransactionSearch,
    ) -> Result<RawResponse, NvpError> {
        self.call("TransactionSearch", &search.params()).await
    }
}

/// Parameters for a `TransactionSearch` call.
///
/// Dates must already be in the provider's `YYYY-MM-DDTHH:MM:SSZ` format;
/// normalizing a plain date into that shape is the caller's job. Unset
/// optional fields are omitted from the request entirely, never sent as
/// empty strings.
#[derive(Debug, Clone, Default)]
pub struct TransactionSearch {
    /// Start of the search window (`STARTDATE`, required).
    pub start_date: String,
    /// End of the search window (`ENDDATE`).
    pub end_date: Option<String>,
    /// Filter by counterparty email (`EMAIL`).
    pub email: Option<String>,
    /// Filter by provider transaction ID (`TRANSACTIONID`).
    pub transaction_id: Option<String>,
    /// Filter by transaction status (`STATUS`).
    pub status: Option<String>,
}

impl TransactionSearch {
    /// A search with only the required start date set.
    pub fn starting(start_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            ..Self::default()
        }
    }

    /// The NVP parameter mapping this search encodes to.
    pub fn params(&self) -> RequestParams {
        let mut params = RequestParams::new();
        params.insert("STARTDATE".to_string(), self.start_date.clone());
        if let Some(end_date) = &self.end_date {
            params.insert("ENDDATE".to_string(), end_date.clone());
        }
        if let Some(email) = &self.email {
            params.insert("EMAIL".to_string(), email.clone());
        }
        if let Some(transaction_id) = &self.transaction_id {
            params.insert("TRANSACTIONID".to_string(), transaction_id.clone());
        }
        if let Some(status) = &self.status {
            params.insert("STATUS".to_string(), status.clone());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Mode;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use std::sync::{Arc, Mutex};

    fn test_client() -> NvpClient {
        NvpClient::new(Credentials::new("u", "p", "s", Mode::Sandbox)).unwrap()
    }

    /// Serves `router` on an ephemeral local port, returning its URL.
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/nvp", addr)
    }

    /// A stub endpoint that records the request body and answers with a
    /// canned NVP response.
    fn recording_stub(reply: &'static str) -> (Router, Arc<Mutex<Option<String>>>) {
        let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let router = Router::new()
            .route(
                "/nvp",
                post(
                    move |State(seen): State<Arc<Mutex<Option<String>>>>, body: String| async move {
                        *seen.lock().unwrap() = Some(body);
                        reply
                    },
                ),
            )
            .with_state(Arc::clone(&seen));
        (router, seen)
    }

    #[test]
    fn new_client_binds_mode_endpoint() {
        let sandbox = test_client();
        assert_eq!(sandbox.endpoint(), "https://api-3t.sandbox.paypal.com/nvp");

        let live = NvpClient::new(Credentials::new("u", "p", "s", Mode::Live)).unwrap();
        assert_eq!(live.endpoint(), "https://api-3t.paypal.com/nvp");
    }

    #[test]
    fn search_with_only_start_date_omits_optional_keys() {
        let params = TransactionSearch::starting("2024-01-01T00:00:00Z").params();
        assert_eq!(
            params.get("STARTDATE").map(String::as_str),
            Some("2024-01-01T00:00:00Z")
        );
        for absent in ["ENDDATE", "EMAIL", "TRANSACTIONID", "STATUS"] {
            assert!(!params.contains_key(absent), "{} should be absent", absent);
        }
    }

    #[test]
    fn search_with_all_fields_includes_them() {
        let search = TransactionSearch {
            start_date: "2024-01-01T00:00:00Z".into(),
            end_date: Some("2024-01-31T23:59:59Z".into()),
            email: Some("buyer@example.com".into()),
            transaction_id: Some("TX123".into()),
            status: Some("Completed".into()),
        };
        let params = search.params();
        assert_eq!(params.len(), 5);
        assert_eq!(params.get("ENDDATE").map(String::as_str), Some("2024-01-31T23:59:59Z"));
        assert_eq!(params.get("STATUS").map(String::as_str), Some("Completed"));
    }

    #[tokio::test]
    async fn call_posts_form_body_and_decodes_response() {
        let (router, seen) = recording_stub("ACK=Success&L_AMT0=1.00&L_TIMESTAMP0=t0");
        let url = spawn_stub(router).await;

        let client = test_client().with_endpoint(url);
        let raw = client
            .call("TransactionSearch", &RequestParams::new())
            .await
            .unwrap();

        assert_eq!(raw.get("ACK").map(String::as_str), Some("Success"));
        assert_eq!(raw.get("L_AMT0").map(String::as_str), Some("1.00"));

        let body = seen.lock().unwrap().clone().unwrap();
        assert!(body.starts_with("METHOD=TransactionSearch&USER=u&"));
    }

    #[tokio::test]
    async fn search_request_omits_unset_optionals_on_the_wire() {
        let (router, seen) = recording_stub("ACK=Success");
        let url = spawn_stub(router).await;

        let client = test_client().with_endpoint(url);
        client
            .transaction_search(&TransactionSearch::starting("2024-01-01T00:00:00Z"))
            .await
            .unwrap();

        let body = seen.lock().unwrap().clone().unwrap();
        assert!(body.contains("STARTDATE=2024-01-01T00%3A00%3A00Z"));
        for absent in ["ENDDATE", "EMAIL", "TRANSACTIONID", "STATUS"] {
            assert!(!body.contains(absent), "{} leaked into the payload", absent);
        }
    }

    #[tokio::test]
    async fn provider_failure_ack_is_returned_not_raised() {
        let (router, _) = recording_stub("ACK=Failure&L_LONGMESSAGE0=Insufficient+funds");
        let url = spawn_stub(router).await;

        let client = test_client().with_endpoint(url);
        let raw = client
            .call("TransactionSearch", &RequestParams::new())
            .await
            .unwrap();

        assert_eq!(raw.get("ACK").map(String::as_str), Some("Failure"));
        assert_eq!(crate::codec::ack::failure_message(&raw), "Insufficient funds");
    }

    #[tokio::test]
    async fn non_success_status_fails_with_status_error() {
        let router = Router::new().route(
            "/nvp",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        );
        let url = spawn_stub(router).await;

        let client = test_client().with_endpoint(url);
        let err = client
            .call("TransactionSearch", &RequestParams::new())
            .await
            .unwrap_err();

        match err {
            NvpError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "down for maintenance");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn slow_endpoint_fails_with_transport_timeout() {
        let router = Router::new().route(
            "/nvp",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "ACK=Success"
            }),
        );
        let url = spawn_stub(router).await;

        let client = test_client()
            .with_endpoint(url)
            .with_timeout(Duration::from_millis(100));
        let err = client
            .call("TransactionSearch", &RequestParams::new())
            .await
            .unwrap_err();

        match err {
            NvpError::Transport(cause) => assert!(cause.is_timeout()),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn connection_refused_fails_with_transport_error() {
        // Bind and immediately drop a listener to get a dead port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = test_client().with_endpoint(format!("http://{}/nvp", addr));
        let err = client
            .call("TransactionSearch", &RequestParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, NvpError::Transport(_)));
    }
}
