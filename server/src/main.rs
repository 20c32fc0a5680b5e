// Copyright (c) 2026 Paylens Contributors. MIT License.
// See LICENSE for details.

//! # Paylens Server
//!
//! Entry point for the `paylens` binary. Parses CLI arguments, initializes
//! logging and metrics, and either serves the JSON API or runs a one-shot
//! transaction search.
//!
//! The binary supports three subcommands:
//!
//! - `serve`   — run the JSON API and metrics endpoints
//! - `search`  — run one transaction search and print records to stdout
//! - `version` — print build version information

mod api;
mod cli;
mod dates;
mod logging;
mod metrics;
mod settings;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;

use paylens_nvp::codec::ack::{failure_message, Ack};
use paylens_nvp::config as nvp_config;
use paylens_nvp::{group_indexed, TransactionSearch};

use cli::{Commands, PaylensCli};
use logging::LogFormat;
use metrics::ServerMetrics;
use settings::{Settings, SettingsError};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = PaylensCli::parse();

    match cli.command {
        Commands::Serve(args) => run_server(args).await,
        Commands::Search(args) => run_search(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the JSON API server and the metrics endpoint.
async fn run_server(args: cli::ServeArgs) -> Result<()> {
    logging::init_logging(
        "paylens_server=info,paylens_nvp=info,tower_http=debug",
        LogFormat::from_str_lossy(&args.log_format),
    );

    let settings = Settings::from_args(&args.credentials);
    tracing::info!(
        port = args.port,
        metrics_port = args.metrics_port,
        mode = %settings.mode,
        "starting paylens server"
    );

    // A missing credential set is not fatal — /health and /config stay up
    // and the provider endpoints answer 400. A bad mode string is fatal.
    let client = match settings.client() {
        Ok(client) => {
            tracing::info!(endpoint = client.endpoint(), "NVP client configured");
            Some(Arc::new(client))
        }
        Err(SettingsError::MissingCredentials) => {
            tracing::warn!(
                "PayPal API credentials missing; set PAYPAL_USER, PAYPAL_PWD, PAYPAL_SIGNATURE"
            );
            None
        }
        Err(SettingsError::Nvp(e)) => {
            return Err(e).context("invalid PayPal configuration");
        }
    };

    let server_metrics = Arc::new(ServerMetrics::new());

    let app_state = api::AppState {
        settings,
        client,
        metrics: Arc::clone(&server_metrics),
    };

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("0.0.0.0:{}", args.port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind API listener on {}", api_addr))?;
    tracing::info!("API server listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&server_metrics));
    let metrics_addr = format!("0.0.0.0:{}", args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    tracing::info!("paylens stopped");
    Ok(())
}

/// Runs one transaction search and prints the records as JSON to stdout.
async fn run_search(args: cli::SearchArgs) -> Result<()> {
    let settings = Settings::from_args(&args.credentials);
    let client = settings
        .client()
        .context("cannot build NVP client from the given credentials")?;

    let start_date = dates::day_start_utc(&args.start_date).map_err(anyhow::Error::msg)?;
    let end_date = match &args.end_date {
        Some(date) => Some(dates::day_end_utc(date).map_err(anyhow::Error::msg)?),
        None => None,
    };

    let search = TransactionSearch {
        start_date,
        end_date,
        email: args.email,
        transaction_id: args.transaction_id,
        status: args.status,
    };

    let raw = client
        .transaction_search(&search)
        .await
        .context("transaction search failed")?;

    if !Ack::of(&raw).is_success() {
        bail!("provider rejected the search: {}", failure_message(&raw));
    }

    let records = group_indexed(&raw, nvp_config::RECORD_GROUP_PREFIX);
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("paylens     {}", env!("CARGO_PKG_VERSION"));
    println!("nvp api     {}", nvp_config::DEFAULT_API_VERSION);
    println!("rustc       {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
