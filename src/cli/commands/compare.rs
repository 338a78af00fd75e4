//! Compare command implementation
//!
//! Multi-fuel price evolution over an adjustable lookback window, plus a
//! summary table of per-fuel mean prices.

use super::shared::{print_empty_state, render_series, setup_logging, today};
use crate::app::services::ledger::HistoryLedger;
use crate::app::services::trend::{self, ComparisonReport, FuelSeries};
use crate::cli::args::{CompareArgs, OutputFormat};
use crate::config::Config;
use crate::Result;
use colored::Colorize;
use tracing::info;

/// Compare command runner
pub fn run_compare(args: CompareArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false);
    args.validate()?;

    let config = Config::new(None, args.ledger.clone())?;
    let ledger = HistoryLedger::new(&config.ledger_path);

    if !ledger.exists() {
        print_empty_state(
            "No price history yet. Run `fuelwatch nearby` to start recording daily means.",
        );
        return Ok(());
    }

    let entries = ledger.load()?;
    info!(
        "Comparing fuels over the last {} days from {} ledger rows",
        args.days,
        entries.len()
    );

    match trend::comparison(&entries, args.days, today()) {
        ComparisonReport::InsufficientData => {
            print_empty_state(&format!(
                "No data in the last {} days yet. Collect a few more days first.",
                args.days
            ));
            Ok(())
        }
        ComparisonReport::Series(all) => {
            render_series(&all, args.output_format)?;
            if args.output_format == OutputFormat::Human {
                print_summary(&all, args.days);
            }
            Ok(())
        }
    }
}

/// Summary table of per-fuel mean price over the window
fn print_summary(all: &[FuelSeries], days: i64) {
    println!();
    println!(
        "{}",
        format!("Mean price over the last {} days:", days).bold()
    );
    for series in all {
        println!(
            "  {:<24} {:>7.3} EUR/L  ({} days recorded)",
            series.fuel.to_string(),
            series.grand_mean,
            series.points.len()
        );
    }
}
