//! Error types for the NVP client.
//!
//! Callers are expected to branch on the variant: a bad mode string is a
//! configuration problem fixable before any request, while status and
//! transport failures happen on the wire. A provider-level rejection
//! (`ACK=Failure`) is deliberately *not* represented here — the HTTP
//! exchange succeeded and the raw response is returned to the caller.

use thiserror::Error;

/// Errors that can occur while constructing or using an [`NvpClient`].
///
/// [`NvpClient`]: crate::client::NvpClient
#[derive(Debug, Error)]
pub enum NvpError {
    /// The mode string is neither `"sandbox"` nor `"live"`. Detected at
    /// construction time, before any network activity.
    #[error("invalid mode {0:?}: expected \"sandbox\" or \"live\"")]
    InvalidMode(String),

    /// The endpoint answered with a non-success HTTP status. The response
    /// body is carried verbatim for logging or display.
    #[error("unexpected HTTP status {status} from NVP endpoint: {body}")]
    Status {
        /// The HTTP status code returned by the endpoint.
        status: u16,
        /// The raw response body, undecoded.
        body: String,
    },

    /// The request never completed: timeout, connection refused or reset,
    /// DNS failure, or a TLS problem. The underlying cause is preserved.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl NvpError {
    /// True when the failure was detected before any request was sent.
    pub fn is_configuration(&self) -> bool {
        matches!(self, NvpError::InvalidMode(_))
    }
}
