//! Command-line arguments and subcommand dispatch.

use std::path::PathBuf;

use agrimart_core::{estimate_delivery_cost, ProductVariant, ShipmentRequest};
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::QuoteConfig;
use crate::report::{render_cart, render_freight, render_tiers, CartReport, TierReport};
use crate::request::{read_json, CartRequest};

#[derive(Debug, Parser)]
#[command(
    name = "agrimart-quote",
    version,
    about = "Price AgriMart carts, tier schedules and deliveries"
)]
pub struct Cli {
    /// Config file (defaults to ./agrimart.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a cart request with tiered pricing and MOQ checks
    Cart { file: PathBuf },
    /// Estimate delivery cost for a shipment request
    Freight { file: PathBuf },
    /// Show and check a variant's tier schedule
    Tiers { file: PathBuf },
}

/// Runs one subcommand and returns what should be printed.
pub fn run(cli: &Cli, config: &QuoteConfig) -> Result<String> {
    match &cli.command {
        Command::Cart { file } => {
            let request: CartRequest = read_json(file)?;
            info!(lines = request.items.len(), file = %file.display(), "pricing cart");

            let cart = request.into_cart()?;
            let report = CartReport::from(&cart);
            for violation in &report.moq_violations {
                warn!(
                    variant = %violation.variant_id,
                    quantity = violation.quantity,
                    "{}",
                    violation.message
                );
            }
            info!(
                subtotal = %report.totals.subtotal,
                ready = report.totals.checkout_ready,
                "cart priced"
            );

            output(cli.json, &report, || render_cart(&report, config))
        }
        Command::Freight { file } => {
            let request: ShipmentRequest = read_json(file)?;
            info!(
                distance_km = request.distance_km,
                weight_kg = request.weight_kg,
                vehicle = ?request.vehicle,
                urgency = ?request.urgency,
                "estimating freight"
            );

            let cost = estimate_delivery_cost(&request, &config.rate_card())?;
            info!(total = %cost.total, "freight estimated");

            output(cli.json, &cost, || render_freight(&cost, config))
        }
        Command::Tiers { file } => {
            let variant: ProductVariant = read_json(file)?;
            let report = TierReport::from(&variant);
            if let Some(problem) = &report.problem {
                warn!(variant = %variant.id, "{}", problem);
            }

            output(cli.json, &report, || render_tiers(&report, config))
        }
    }
}

fn output<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text())
    }
}
