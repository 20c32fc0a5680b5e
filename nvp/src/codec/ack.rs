//! Acknowledgement interpretation.
//!
//! The `ACK` field is the provider-level verdict, one layer above the
//! HTTP status: a 200 response can still say `ACK=Failure`. The client
//! returns such responses unchanged; these helpers give every caller the
//! same rule for reading them.

use crate::config;

use super::decode::RawResponse;

/// The provider-level acknowledgement of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
    /// `ACK=Success` — the payload is usable.
    Success,
    /// `ACK=SuccessWithWarning` — usable, with warnings attached.
    SuccessWithWarning,
    /// Any other ACK value, carried verbatim. An absent `ACK` field is
    /// `Failure("")` — a response without a verdict is not a success.
    Failure(String),
}

impl Ack {
    /// Reads the acknowledgement out of a decoded response.
    pub fn of(raw: &RawResponse) -> Ack {
        match raw.get(config::ACK_FIELD).map(String::as_str) {
            Some(config::ACK_SUCCESS) => Ack::Success,
            Some(config::ACK_SUCCESS_WITH_WARNING) => Ack::SuccessWithWarning,
            Some(other) => Ack::Failure(other.to_string()),
            None => Ack::Failure(String::new()),
        }
    }

    /// True when record parsing should proceed.
    pub fn is_success(&self) -> bool {
        matches!(self, Ack::Success | Ack::SuccessWithWarning)
    }
}

/// Picks a human-readable message out of a failed response.
///
/// Prefers `L_LONGMESSAGE0`, falls back to `L_SHORTMESSAGE0`, then to a
/// generic placeholder. A present-but-blank message field counts as
/// absent for the fallback chain.
pub fn failure_message(raw: &RawResponse) -> String {
    for field in [config::LONG_MESSAGE_FIELD, config::SHORT_MESSAGE_FIELD] {
        if let Some(message) = raw.get(field) {
            if !message.is_empty() {
                return message.clone();
            }
        }
    }
    config::GENERIC_FAILURE_MESSAGE.to_string()
}
