//! Command implementations for the fuelwatch CLI
//!
//! This module contains the command execution logic for each view of the
//! dashboard. Each command is implemented in its own module:
//! - `nearby`: station search, display and daily ledger append
//! - `trend`: single-fuel price evolution over a fixed window
//! - `compare`: multi-fuel comparison over an adjustable window

pub mod compare;
pub mod nearby;
pub mod shared;
pub mod trend;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for fuelwatch
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
pub fn run(args: Args) -> Result<()> {
    match args.get_command() {
        Commands::Nearby(nearby_args) => nearby::run_nearby(nearby_args),
        Commands::Trend(trend_args) => trend::run_trend(trend_args),
        Commands::Compare(compare_args) => compare::run_compare(compare_args),
    }
}
