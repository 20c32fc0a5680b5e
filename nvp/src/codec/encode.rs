//! Request payload construction.
//!
//! Every NVP request carries the same five reserved fields — `METHOD` plus
//! the four identity fields from the credentials — followed by the
//! method-specific parameters. Precedence is fixed: a caller parameter
//! named like a reserved field is dropped, never serialized twice and
//! never allowed to override the client's identity.

use std::collections::BTreeMap;

use crate::config;
use crate::credentials::Credentials;

/// Method-specific request parameters, keyed by NVP field name
/// (uppercase by convention, e.g. `STARTDATE`).
pub type RequestParams = BTreeMap<String, String>;

/// Builds the `application/x-www-form-urlencoded` body for one NVP call.
///
/// The output contains `METHOD`, `USER`, `PWD`, `SIGNATURE`, `VERSION`
/// in that order, then the caller parameters. No key appears twice.
pub fn build_payload(method: &str, credentials: &Credentials, params: &RequestParams) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(5 + params.len());
    pairs.push(("METHOD", method));
    pairs.push(("USER", &credentials.user));
    pairs.push(("PWD", &credentials.password));
    pairs.push(("SIGNATURE", &credentials.signature));
    pairs.push(("VERSION", &credentials.version));

    for (key, value) in params {
        if config::RESERVED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        pairs.push((key.as_str(), value.as_str()));
    }

    serde_urlencoded::to_string(&pairs).expect("string pairs always form-encode")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::parse_response;
    use crate::credentials::Mode;

    fn test_credentials() -> Credentials {
        Credentials::new("api_user", "api_pwd", "api_sig", Mode::Sandbox)
    }

    fn params(entries: &[(&str, &str)]) -> RequestParams {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn payload_starts_with_method_and_identity_fields() {
        let body = build_payload("TransactionSearch", &test_credentials(), &RequestParams::new());
        assert_eq!(
            body,
            "METHOD=TransactionSearch&USER=api_user&PWD=api_pwd&SIGNATURE=api_sig&VERSION=204"
        );
    }

    #[test]
    fn caller_params_follow_the_base_fields() {
        let body = build_payload(
            "TransactionSearch",
            &test_credentials(),
            &params(&[("STARTDATE", "2024-01-01T00:00:00Z")]),
        );
        assert!(body.starts_with("METHOD=TransactionSearch&"));
        assert!(body.ends_with("&STARTDATE=2024-01-01T00%3A00%3A00Z"));
    }

    #[test]
    fn reserved_names_cannot_be_overridden_by_params() {
        let body = build_payload(
            "TransactionSearch",
            &test_credentials(),
            &params(&[("USER", "attacker"), ("METHOD", "DoCapture"), ("EMAIL", "a@b.c")]),
        );
        assert_eq!(body.matches("USER=").count(), 1);
        assert!(body.contains("USER=api_user"));
        assert!(body.contains("METHOD=TransactionSearch"));
        assert!(!body.contains("attacker"));
        assert!(!body.contains("DoCapture"));
        assert!(body.contains("EMAIL=a%40b.c"));
    }

    #[test]
    fn encode_then_parse_roundtrips_params() {
        let original = params(&[
            ("STARTDATE", "2024-01-01T00:00:00Z"),
            ("EMAIL", "buyer+tag@example.com"),
            ("NOTE", "50% off & free shipping"),
            ("EMPTY", ""),
        ]);
        let body = build_payload("TransactionSearch", &test_credentials(), &original);
        let decoded = parse_response(&body);

        for (key, value) in &original {
            assert_eq!(decoded.get(key), Some(value), "field {}", key);
        }
        assert_eq!(decoded.get("METHOD").map(String::as_str), Some("TransactionSearch"));
    }
}
