//! # Wire-Format Constants
//!
//! Every fixed string and magic value of the NVP integration lives here.
//! The endpoint URLs and field names are PayPal's contract, not ours —
//! changing any of them means talking to a different API.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Signature-authenticated NVP endpoint for the sandbox environment.
pub const SANDBOX_ENDPOINT: &str = "https://api-3t.sandbox.paypal.com/nvp";

/// Signature-authenticated NVP endpoint for the live environment.
/// Requests here move real money.
pub const LIVE_ENDPOINT: &str = "https://api-3t.paypal.com/nvp";

/// Web host for browser redirects in the sandbox environment.
pub const SANDBOX_WEB_HOST: &str = "www.sandbox.paypal.com";

/// Web host for browser redirects in the live environment.
pub const LIVE_WEB_HOST: &str = "www.paypal.com";

// ---------------------------------------------------------------------------
// Request Parameters
// ---------------------------------------------------------------------------

/// NVP API version sent with every request. 204 is the last version the
/// classic API shipped; newer integrations use the REST API instead.
pub const DEFAULT_API_VERSION: &str = "204";

/// Field names the payload builder owns. Caller-supplied parameters with
/// these names are dropped — the identity and method fields always come
/// from the credentials and the method argument.
pub const RESERVED_FIELDS: [&str; 5] = ["METHOD", "USER", "PWD", "SIGNATURE", "VERSION"];

/// Total per-request timeout. One attempt, no retries; after this long
/// the call fails with a transport error.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Response Fields
// ---------------------------------------------------------------------------

/// Prefix shared by every indexed record key in a TransactionSearch
/// response (`L_TIMESTAMP0`, `L_AMT0`, ...).
pub const RECORD_GROUP_PREFIX: &str = "L_";

/// The provider-level acknowledgement field. Distinct from the HTTP
/// status — a 200 response can still carry `ACK=Failure`.
pub const ACK_FIELD: &str = "ACK";

/// ACK value for an unqualified success.
pub const ACK_SUCCESS: &str = "Success";

/// ACK value for a success with non-fatal warnings attached. The payload
/// is still usable.
pub const ACK_SUCCESS_WITH_WARNING: &str = "SuccessWithWarning";

/// First choice for a human-readable failure message.
pub const LONG_MESSAGE_FIELD: &str = "L_LONGMESSAGE0";

/// Fallback message field when the long message is missing or blank.
pub const SHORT_MESSAGE_FIELD: &str = "L_SHORTMESSAGE0";

/// Last-resort failure message when the provider supplies neither.
pub const GENERIC_FAILURE_MESSAGE: &str = "Unknown error";
