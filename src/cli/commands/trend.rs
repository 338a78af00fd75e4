//! Trend command implementation
//!
//! Single-fuel price evolution over a fixed 14-day window, read from the
//! history ledger.

use super::shared::{print_empty_state, render_series, setup_logging, today};
use crate::app::services::ledger::HistoryLedger;
use crate::app::services::trend::{self, TrendReport};
use crate::cli::args::TrendArgs;
use crate::config::Config;
use crate::constants::TREND_WINDOW_DAYS;
use crate::Result;
use tracing::info;

/// Trend command runner
pub fn run_trend(args: TrendArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false);

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
        "Charting {} over the last {} days from {} ledger rows",
        args.fuel,
        TREND_WINDOW_DAYS,
        entries.len()
    );

    match trend::series(&entries, args.fuel, TREND_WINDOW_DAYS, today()) {
        TrendReport::InsufficientData => {
            print_empty_state(&format!(
                "Not enough {} data in the last {} days yet. Collect a few more days first.",
                args.fuel, TREND_WINDOW_DAYS
            ));
            Ok(())
        }
        TrendReport::Series(series) => render_series(&[series], args.output_format),
    }
}
