//! # NVP Codec
//!
//! The translation layer between PayPal's flat name-value-pair wire format
//! and structured data. Three stages, all pure functions:
//!
//! 1. **Encode** — [`build_payload`] assembles the identity fields and
//!    caller parameters into a form-urlencoded request body.
//! 2. **Decode-flat** — [`parse_response`] turns the response body (itself
//!    form-encoded text, not JSON) into a string-to-string mapping.
//! 3. **Decode-indexed** — [`group_indexed`] regroups index-suffixed keys
//!    (`L_TIMESTAMP0`, `L_AMT0`, `L_TIMESTAMP1`, ...) into one
//!    [`TransactionRecord`] per index, ordered by index.
//!
//! ## Wire Format
//!
//! ```text
//! Request:  METHOD=TransactionSearch&USER=...&PWD=...&SIGNATURE=...
//!           &VERSION=204&STARTDATE=2024-01-01T00%3A00%3A00Z
//!
//! Response: ACK=Success&VERSION=204&L_TIMESTAMP0=2024-01-03T...
//!           &L_AMT0=12.50&L_TIMESTAMP1=2024-01-02T...&L_AMT1=-3.00
//! ```
//!
//! The [`ack`] submodule interprets the `ACK` field — the provider-level
//! success signal that lives one layer above the HTTP status.

pub mod ack;

mod decode;
mod encode;
mod records;

pub use decode::{parse_response, RawResponse};
pub use encode::{build_payload, RequestParams};
pub use records::{group_indexed, TransactionRecord};
