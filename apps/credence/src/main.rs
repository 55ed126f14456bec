//! # Credence - Probabilistic Concept Base
//!
//! The host binary for the credence-core knowledge kernel.
//!
//! This application provides:
//! - CLI surface for every kernel operation (create/assert/query/infer)
//! - Snapshot file lifecycle (load on start, save after mutations)
//! - Caller identity and wall-clock timestamps at the kernel boundary
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            apps/credence (THE HOST)          │
//! │                                              │
//! │   CLI (clap) · snapshot file I/O · identity  │
//! │                      │                       │
//! │                      ▼                       │
//! │              ┌───────────────┐               │
//! │              │ credence-core │               │
//! │              │  (THE LOGIC)  │               │
//! │              └───────────────┘               │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! credence init
//! credence create-concept --name Dog
//! credence assert --from 0 --to 1 --type 0 --probability 1/1 --confidence 99/100
//! credence infer --start 0 --max-depth 3
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — CREDENCE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("CREDENCE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "credence=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        "Credence v{} - probabilistic concept base\n",
        env!("CARGO_PKG_VERSION")
    );
}
