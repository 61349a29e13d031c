//! # agrimart-quote
//!
//! Command-line front end for agrimart-core. Reads JSON requests (a cart, a
//! shipment, a variant's tier schedule), prices them and prints a report.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  agrimart.toml / AGRIMART_* ──► QuoteConfig ──┐                         │
//! │                                               ▼                         │
//! │  request.json ──► request ──► agrimart-core ──► report ──► stdout       │
//! │                                                                         │
//! │  tracing events ─────────────────────────────────────────► stderr       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod report;
pub mod request;

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` wins over the configured filter.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
