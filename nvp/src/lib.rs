// Copyright (c) 2026 Paylens Contributors. MIT License.
// See LICENSE for details.

//! # Paylens NVP — Core Library
//!
//! A client for PayPal's legacy Name-Value-Pair (NVP) API, built for one
//! job: pulling transaction history out of an account and turning the
//! provider's gloriously flat wire format into something a program can
//! actually use.
//!
//! NVP predates JSON APIs. Requests are `application/x-www-form-urlencoded`
//! POST bodies, responses are *also* form-encoded text, and repeated record
//! groups are flattened into keys with numeric suffixes (`L_TIMESTAMP0`,
//! `L_AMT0`, `L_TIMESTAMP1`, ...). Most of this crate is the careful
//! unflattening of that format.
//!
//! ## Architecture
//!
//! - **credentials** — API credentials and the sandbox/live mode switch.
//! - **codec** — Encoding payloads, decoding flat responses, regrouping
//!   indexed keys into ordered transaction records, ACK interpretation.
//! - **client** — One HTTP POST per call, a bounded timeout, no retries.
//! - **config** — Endpoint URLs and wire-format constants.
//! - **error** — What can go wrong, as a branchable enum.
//!
//! ## Design Philosophy
//!
//! 1. The codec is pure: same input, same output, no I/O.
//! 2. Credentials are explicit parameters. This crate never reads the
//!    environment and never logs — the caller owns both concerns.
//! 3. A provider-level failure (`ACK=Failure`) is data, not an error.
//!    The transport succeeded; the caller decides what to do with it.
//! 4. Unknown response fields are ignored, not fatal. The provider adds
//!    fields without warning and we'd like to keep working when it does.

pub mod client;
pub mod codec;
pub mod config;
pub mod credentials;
pub mod error;

pub use client::{NvpClient, TransactionSearch};
pub use codec::{
    build_payload, group_indexed, parse_response, RawResponse, RequestParams, TransactionRecord,
};
pub use credentials::{Credentials, Mode};
pub use error::NvpError;
