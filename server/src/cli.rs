//! # CLI Interface
//!
//! Defines the command-line argument structure for the `paylens` binary
//! using `clap` derive. Supports three subcommands: `serve`, `search`,
//! and `version`. Credentials are accepted as flags but are normally
//! supplied through the `PAYPAL_*` environment variables.

use clap::{Args, Parser, Subcommand};

/// PayPal transaction activity viewer.
///
/// Queries the classic NVP TransactionSearch API and serves the results
/// as JSON, either over HTTP (`serve`) or straight to stdout (`search`).
#[derive(Parser, Debug)]
#[command(
    name = "paylens",
    about = "PayPal NVP transaction activity viewer",
    version,
    propagate_version = true
)]
pub struct PaylensCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the paylens binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the JSON API server.
    Serve(ServeArgs),
    /// Run one transaction search and print the records as JSON.
    Search(SearchArgs),
    /// Print version information and exit.
    Version,
}

/// PayPal API credentials, shared by every subcommand that talks to the
/// provider. Normally sourced from the environment.
#[derive(Args, Debug, Clone)]
pub struct CredentialArgs {
    /// NVP API username.
    #[arg(long, env = "PAYPAL_USER")]
    pub user: Option<String>,

    /// NVP API password.
    #[arg(long, env = "PAYPAL_PWD", hide_env_values = true)]
    pub password: Option<String>,

    /// NVP API signature.
    #[arg(long, env = "PAYPAL_SIGNATURE", hide_env_values = true)]
    pub signature: Option<String>,

    /// Target environment: "sandbox" or "live".
    #[arg(long, env = "PAYPAL_MODE", default_value = "sandbox")]
    pub mode: String,

    /// NVP API version sent with every request.
    #[arg(long, env = "PAYPAL_API_VERSION", default_value = "204")]
    pub api_version: String,
}

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port for the JSON API.
    #[arg(long, env = "PAYLENS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "PAYLENS_METRICS_PORT", default_value_t = 8081)]
    pub metrics_port: u16,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "PAYLENS_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Start of the search window, as YYYY-MM-DD.
    #[arg(long)]
    pub start_date: String,

    /// End of the search window, as YYYY-MM-DD. Searched through the end
    /// of that day. Omitted from the request when not given.
    #[arg(long)]
    pub end_date: Option<String>,

    /// Filter by counterparty email.
    #[arg(long)]
    pub email: Option<String>,

    /// Filter by provider transaction ID.
    #[arg(long)]
    pub transaction_id: Option<String>,

    /// Filter by transaction status (e.g. "Completed").
    #[arg(long)]
    pub status: Option<String>,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}
