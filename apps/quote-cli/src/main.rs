use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use agrimart_quote::cli::{run, Cli};
use agrimart_quote::config::QuoteConfig;
use agrimart_quote::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = QuoteConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.log_filter);
    info!(
        currency = %config.currency_symbol,
        config_file = ?cli.config,
        "Configuration loaded"
    );

    let output = run(&cli, &config)?;
    print!("{}", output);
    Ok(())
}
