//! Houseboat price CLI
//!
//! Thin adapter over the pricing library with two modes:
//! - comparable: price from historical single-night bookings
//! - rules: price a stay from calendar multipliers

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use houseboat_pricing::config::Settings;
use houseboat_pricing::pricing::dataset::{load_records_from_path, PricingContext};
use houseboat_pricing::pricing::responses::{
    ComparableEstimateResponse, PricingErrorResponse, StayQuoteResponse,
};
use houseboat_pricing::pricing::{comparable, rules, PriceQuery, StayRequest};
use houseboat_pricing::PricingError;

#[derive(Parser)]
#[command(name = "houseboat-price")]
#[command(about = "Estimate houseboat rental prices")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price from comparable historical bookings
    Comparable {
        /// JSON booking dataset (defaults to HOUSEBOAT_DATASET)
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Number of guests
        #[arg(long)]
        capacity: u32,

        #[arg(long)]
        bedrooms: u32,

        /// Houseboat type label, or S / L for Standard / Luxury
        #[arg(long = "type")]
        houseboat_type: String,

        /// Season label, or P / O for Peak / Off-Season
        #[arg(long)]
        season: String,
    },

    /// Price a stay from season and weekend rules
    Rules {
        /// Owner's base price per night
        #[arg(long)]
        base_price: Decimal,

        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        check_in: String,

        /// Check-out date (YYYY-MM-DD)
        #[arg(long)]
        check_out: String,

        /// Platform fee percent (defaults to HOUSEBOAT_PLATFORM_FEE_PERCENT or 10)
        #[arg(long)]
        fee: Option<Decimal>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => return report(&e),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<PricingError>() {
            Some(pricing) => report(pricing),
            None => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Comparable {
            dataset,
            capacity,
            bedrooms,
            houseboat_type,
            season,
        } => {
            let path = dataset
                .or_else(|| settings.dataset_path.clone())
                .context("no dataset given: pass --dataset or set HOUSEBOAT_DATASET")?;
            let records = load_records_from_path(&path)?;
            let context = PricingContext::from_records(records)?;

            let query = PriceQuery::new(
                capacity,
                bedrooms,
                expand_houseboat_type(&houseboat_type),
                expand_season(&season),
            );
            let estimate = comparable::estimate(&context, &query)?;
            print_json(&ComparableEstimateResponse::from_estimate(
                &estimate,
                &settings.currency,
            ))
        }
        Commands::Rules {
            base_price,
            check_in,
            check_out,
            fee,
        } => {
            let request = StayRequest::parse(base_price, &check_in, &check_out)?
                .with_platform_fee(fee.unwrap_or(settings.platform_fee_percent));
            let quote = rules::estimate(&request)?;
            print_json(&StayQuoteResponse::from_quote(&quote, &settings.currency))
        }
    }
}

/// Single-letter shortcuts from the booking prompt; anything else is a literal label.
fn expand_houseboat_type(input: &str) -> String {
    match input.trim().to_uppercase().as_str() {
        "S" => "Standard".to_string(),
        "L" => "Luxury".to_string(),
        _ => input.trim().to_string(),
    }
}

fn expand_season(input: &str) -> String {
    match input.trim().to_uppercase().as_str() {
        "P" => "Peak".to_string(),
        "O" => "Off-Season".to_string(),
        _ => input.trim().to_string(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(err: &PricingError) -> ExitCode {
    let response = PricingErrorResponse::from(err);
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(_) => eprintln!("Error: {}", err),
    }
    ExitCode::from(2)
}
