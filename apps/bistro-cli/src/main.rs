//! # Bistro CLI
//!
//! Command-line host for the totals engine. It plays the part the web
//! application's API routes play in production: parse a request, call
//! `bistro-core`, hand the result back.
//!
//! ## Commands
//! ```text
//! bistro invoice <FILE>                                 per-item discount & tax
//! bistro order <FILE> [--discount D] [--service-tax-rate R]
//!                                                       one discount + service tax
//! bistro summary <FILE>                                 dashboard sales figures
//! ```
//!
//! `<FILE>` is a JSON request; `-` reads standard input. `--json` prints the
//! full-precision and cent-rounded totals instead of a receipt.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use bistro_core::TaxRate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Bistro back-office order and invoice totals
#[derive(Parser)]
#[command(name = "bistro")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file path (default: ./bistro.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Total an invoice: every line carries its own discount and tax rate
    Invoice {
        /// JSON request `{ "items": [...] }`, or `-` for stdin
        file: PathBuf,
    },

    /// Total an order: one discount, then a flat service tax
    Order {
        /// JSON request `{ "items": [...] }`, or `-` for stdin
        file: PathBuf,

        /// Absolute discount on the whole order
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        discount: Decimal,

        /// Service tax in percent (default: from configuration)
        #[arg(long, allow_negative_numbers = true)]
        service_tax_rate: Option<Decimal>,
    },

    /// Summarize a batch of orders for the dashboard
    Summary {
        /// JSON request `{ "orders": [ { "items": [...], "policy": {...} } ] }`
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    init_tracing(&config.log_filter);
    info!(
        currency = %config.currency_symbol,
        service_tax_rate = %config.service_tax_rate,
        "Configuration loaded"
    );

    if let Err(e) = run(cli, &config) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli, config: &CliConfig) -> Result<()> {
    let symbol = config.currency_symbol.as_str();

    match cli.command {
        Commands::Invoice { file } => {
            let report = commands::invoice(&file)?;
            emit(cli.json, &report, || output::receipt(&report, symbol))
        }
        Commands::Order {
            file,
            discount,
            service_tax_rate,
        } => {
            let rate = service_tax_rate
                .map(TaxRate::from_percent)
                .unwrap_or_else(|| config.service_tax());
            let report = commands::order(&file, discount, rate)?;
            emit(cli.json, &report, || output::receipt(&report, symbol))
        }
        Commands::Summary { file } => {
            let report = commands::summary(&file)?;
            emit(cli.json, &report, || output::summary_card(&report, symbol))
        }
    }
}

fn emit<T, F>(json: bool, value: &T, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> Result<String>,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", render()?);
    }
    Ok(())
}

/// Logs go to stderr so `--json` output stays parseable.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_discount_reaches_the_engine() {
        let cli = Cli::try_parse_from(["bistro", "order", "-", "--discount", "-5"]).unwrap();

        match cli.command {
            Commands::Order { discount, .. } => assert_eq!(discount, dec!(-5)),
            _ => panic!("expected the order command"),
        }
    }

    #[test]
    fn test_negative_service_tax_rate_parses() {
        let cli =
            Cli::try_parse_from(["bistro", "order", "-", "--service-tax-rate", "-6"]).unwrap();

        match cli.command {
            Commands::Order {
                service_tax_rate, ..
            } => assert_eq!(service_tax_rate, Some(dec!(-6))),
            _ => panic!("expected the order command"),
        }
    }
}
