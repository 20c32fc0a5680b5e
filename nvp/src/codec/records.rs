//! Indexed-key regrouping.
//!
//! A TransactionSearch response flattens its result list into keys of the
//! shape `<bare field><index>`: `L_TIMESTAMP0` is the timestamp of record
//! 0, `L_AMT7` the amount of record 7. The split rule is the longest
//! *trailing* run of decimal digits — nothing smarter. `L_A1B2` splits
//! into bare field `L_A1B` and index 2; a key with no trailing digits
//! belongs to no record and is dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::decode::RawResponse;

/// One transaction row from a TransactionSearch response.
///
/// Every field is a string straight off the wire; a field the provider
/// did not send for this index is the empty string. Amounts keep the
/// provider's decimal formatting (e.g. `"-3.00"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction timestamp (`L_TIMESTAMP`), provider-formatted.
    pub timestamp: String,
    /// Transaction type (`L_TYPE`), e.g. "Payment", "Refund".
    #[serde(rename = "type")]
    pub kind: String,
    /// Counterparty email address (`L_EMAIL`).
    pub email: String,
    /// Counterparty display name (`L_NAME`).
    pub name: String,
    /// Provider transaction ID (`L_TRANSACTIONID`).
    pub transaction_id: String,
    /// Transaction status (`L_STATUS`), e.g. "Completed", "Pending".
    pub status: String,
    /// Gross amount (`L_AMT`), signed decimal string.
    pub amount: String,
    /// Three-letter currency code (`L_CURRENCYCODE`).
    pub currency: String,
    /// Fee amount (`L_FEEAMT`), signed decimal string.
    pub fee: String,
    /// Net amount (`L_NETAMT`), signed decimal string.
    pub net: String,
}

/// Regroups indexed keys into one record per index, ascending by index.
///
/// Keys not starting with `prefix` are ignored, as are keys with no
/// trailing digit run. Index 0 is a valid index. Bare fields with no
/// corresponding [`TransactionRecord`] attribute are ignored, so new
/// provider fields never break decoding.
pub fn group_indexed(raw: &RawResponse, prefix: &str) -> Vec<TransactionRecord> {
    let mut by_index: BTreeMap<usize, BTreeMap<&str, &str>> = BTreeMap::new();

    for (key, value) in raw {
        if !key.starts_with(prefix) {
            continue;
        }
        let Some((bare, index)) = split_indexed_key(key) else {
            continue;
        };
        by_index.entry(index).or_default().insert(bare, value.as_str());
    }

    // BTreeMap iteration is already ascending by index.
    by_index.into_values().map(record_from_fields).collect()
}

/// Splits a raw key into (bare field, index) by its longest trailing
/// digit run. Returns `None` when the key has no trailing digits, or
/// when the run overflows `usize` (treated as not indexed).
fn split_indexed_key(key: &str) -> Option<(&str, usize)> {
    let digits = key
        .bytes()
        .rev()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    let split = key.len() - digits;
    let index = key[split..].parse::<usize>().ok()?;
    Some((&key[..split], index))
}

/// Translates the bare fields gathered for one index into a record.
fn record_from_fields(fields: BTreeMap<&str, &str>) -> TransactionRecord {
    let field = |name: &str| fields.get(name).map(|v| v.to_string()).unwrap_or_default();

    TransactionRecord {
        timestamp: field("L_TIMESTAMP"),
        kind: field("L_TYPE"),
        email: field("L_EMAIL"),
        name: field("L_NAME"),
        transaction_id: field("L_TRANSACTIONID"),
        status: field("L_STATUS"),
        amount: field("L_AMT"),
        currency: field("L_CURRENCYCODE"),
        fee: field("L_FEEAMT"),
        net: field("L_NETAMT"),
    }
}
