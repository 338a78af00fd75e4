//! Command-line argument definitions for fuelwatch
//!
//! This module defines the CLI interface using the clap derive API. Each
//! user-facing view of the dashboard is a subcommand: `nearby` for the
//! station search, `trend` for the single-fuel history, `compare` for the
//! multi-fuel comparison.

use crate::app::models::FuelType;
use crate::constants::{
    DEFAULT_COMPARE_WINDOW_DAYS, DEFAULT_MAX_DISTANCE_KM, MAX_COMPARE_WINDOW_DAYS,
    MAX_MAX_DISTANCE_KM, MIN_COMPARE_WINDOW_DAYS, MIN_MAX_DISTANCE_KM,
};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the fuel price dashboard
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fuelwatch",
    version,
    about = "Spanish fuel-station prices: nearby stations, a daily price ledger and trend reports",
    long_about = "Fetches service-station fuel prices for a province from the Ministry's open \
                  pricing API, lists the stations nearest to you, and keeps a small local \
                  history of mean prices so you can follow how they evolve over time."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Find stations near a reference point and record today's mean price
    Nearby(NearbyArgs),
    /// Show the price evolution of one fuel over the last 14 days
    Trend(TrendArgs),
    /// Compare price evolution across all fuels over an adjustable window
    Compare(CompareArgs),
}

/// Arguments for the nearby-station search
#[derive(Debug, Clone, Parser)]
pub struct NearbyArgs {
    /// Province code scoping the price feed query (e.g. 08 for Barcelona,
    /// 28 for Madrid)
    #[arg(short = 'p', long = "province", value_name = "CODE")]
    pub province: Option<String>,

    /// Reference latitude in decimal degrees
    ///
    /// When not given, the reference point is resolved by IP geolocation,
    /// falling back to the built-in default coordinates.
    #[arg(long = "lat", value_name = "DEG", requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Reference longitude in decimal degrees
    #[arg(long = "lon", value_name = "DEG", requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Skip the IP geolocation lookup and use the default coordinates
    #[arg(long = "no-geolocate", conflicts_with_all = ["lat", "lon"])]
    pub no_geolocate: bool,

    /// Fuel type whose mean price is recorded in the ledger
    #[arg(short = 'f', long = "fuel", value_name = "FUEL", default_value = "gasolina-95-e5")]
    pub fuel: FuelType,

    /// Maximum station distance from the reference point, in km
    #[arg(
        short = 'd',
        long = "max-distance",
        value_name = "KM",
        default_value_t = DEFAULT_MAX_DISTANCE_KM
    )]
    pub max_distance_km: f64,

    /// Path to the price history ledger file
    ///
    /// Defaults to the platform data directory.
    #[arg(long = "ledger", value_name = "FILE")]
    pub ledger: Option<PathBuf>,

    /// Output format for the station list
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the single-fuel trend view (fixed 14-day window)
#[derive(Debug, Clone, Parser)]
pub struct TrendArgs {
    /// Fuel type to chart
    #[arg(short = 'f', long = "fuel", value_name = "FUEL", default_value = "gasolina-95-e5")]
    pub fuel: FuelType,

    /// Path to the price history ledger file
    #[arg(long = "ledger", value_name = "FILE")]
    pub ledger: Option<PathBuf>,

    /// Output format for the series
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the multi-fuel comparative view
#[derive(Debug, Clone, Parser)]
pub struct CompareArgs {
    /// Lookback window in days (3 to 30)
    #[arg(
        long = "days",
        value_name = "DAYS",
        default_value_t = DEFAULT_COMPARE_WINDOW_DAYS
    )]
    pub days: i64,

    /// Path to the price history ledger file
    #[arg(long = "ledger", value_name = "FILE")]
    pub ledger: Option<PathBuf>,

    /// Output format for the series
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl NearbyArgs {
    /// Validate the nearby command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !(MIN_MAX_DISTANCE_KM..=MAX_MAX_DISTANCE_KM).contains(&self.max_distance_km) {
            return Err(Error::configuration(format!(
                "Search radius must be between {} and {} km (got {})",
                MIN_MAX_DISTANCE_KM, MAX_MAX_DISTANCE_KM, self.max_distance_km
            )));
        }

        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(Error::configuration(format!(
                    "Latitude {} is outside the valid range -90..90",
                    lat
                )));
            }
            if !(-180.0..=180.0).contains(&lon) {
                return Err(Error::configuration(format!(
                    "Longitude {} is outside the valid range -180..180",
                    lon
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            verbosity_level(self.verbose)
        }
    }
}

impl TrendArgs {
    pub fn get_log_level(&self) -> &'static str {
        verbosity_level(self.verbose)
    }
}

impl CompareArgs {
    /// Validate the compare command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !(MIN_COMPARE_WINDOW_DAYS..=MAX_COMPARE_WINDOW_DAYS).contains(&self.days) {
            return Err(Error::configuration(format!(
                "Lookback window must be between {} and {} days (got {})",
                MIN_COMPARE_WINDOW_DAYS, MAX_COMPARE_WINDOW_DAYS, self.days
            )));
        }
        Ok(())
    }

    pub fn get_log_level(&self) -> &'static str {
        verbosity_level(self.verbose)
    }
}

fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
