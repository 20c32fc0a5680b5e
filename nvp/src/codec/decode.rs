//! Flat response decoding.
//!
//! The provider's response body is form-encoded text. The parse is
//! deliberately loose: the upstream encoding is not strictly validated
//! anywhere, so a malformed pair must degrade gracefully instead of
//! failing the whole response.

use std::collections::BTreeMap;

/// A decoded NVP response: flat string keys to string values, no nesting.
pub type RawResponse = BTreeMap<String, String>;

/// Parses a percent-encoded `key=value&key=value` body into a mapping.
///
/// Blank values are preserved (a key with an empty value stays in the
/// map), a pair with no `=` decodes as a key with an empty value, and
/// duplicate keys resolve to the last occurrence. This function never
/// fails; unparseable input yields an empty mapping.
pub fn parse_response(body: &str) -> RawResponse {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body).unwrap_or_default();

    let mut raw = RawResponse::new();
    for (key, value) in pairs {
        raw.insert(key, value);
    }
    raw
}
