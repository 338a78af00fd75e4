//! Shared components for CLI commands
//!
//! Logging setup, reference location resolution and the rendering helpers
//! used by more than one view.

use crate::app::services::fetch;
use crate::app::services::trend::FuelSeries;
use crate::cli::args::OutputFormat;
use crate::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use crate::{Error, Result};
use chrono::NaiveDate;
use colored::Colorize;
use tracing::{debug, info, warn};

/// Set up structured logging from a command's verbosity flags
pub fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fuelwatch={}", log_level)));

    if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Resolve the session's reference coordinate
///
/// Explicit flags win; otherwise IP geolocation is attempted; the fixed
/// default coordinates are the final fallback.
pub fn resolve_location(
    lat: Option<f64>,
    lon: Option<f64>,
    no_geolocate: bool,
) -> (f64, f64) {
    if let (Some(lat), Some(lon)) = (lat, lon) {
        info!("Using reference location from flags: ({}, {})", lat, lon);
        return (lat, lon);
    }

    if !no_geolocate {
        if let Some(coords) = fetch::locate_by_ip() {
            info!(
                "Reference location from IP geolocation: ({}, {})",
                coords.latitude, coords.longitude
            );
            return (coords.latitude, coords.longitude);
        }
        warn!("IP geolocation failed; falling back to default coordinates");
    }

    info!(
        "Using default reference location: ({}, {})",
        DEFAULT_LATITUDE, DEFAULT_LONGITUDE
    );
    (DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
}

/// Today's calendar date from the system clock (no time component)
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Render an informational empty state (not an error)
pub fn print_empty_state(message: &str) {
    println!("{}", message.yellow());
}

/// Render an inline failure message for a degraded view
pub fn print_view_failure(error: &Error) {
    println!("{}", format!("✗ {}", error).red());
}

/// Render one fuel series in the requested format
pub fn render_series(all: &[FuelSeries], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for series in all {
                println!();
                println!("{}", series.fuel.to_string().bold());
                for point in &series.points {
                    println!("  {}  {:>7.3} EUR/L", point.date, point.mean_price);
                }
                println!(
                    "  {} {:.3} EUR/L",
                    "mean over window:".dimmed(),
                    series.grand_mean
                );
            }
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(all)
                .map_err(|e| Error::data_validation(format!("JSON encoding failed: {}", e)))?;
            println!("{}", json);
            Ok(())
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer
                .write_record(["date", "fuel", "mean_price"])
                .map_err(|e| Error::csv("cannot write series header", Some(e)))?;
            for series in all {
                for point in &series.points {
                    writer
                        .write_record([
                            point.date.to_string(),
                            series.fuel.feed_column().to_string(),
                            format!("{:.3}", point.mean_price),
                        ])
                        .map_err(|e| Error::csv("cannot write series row", Some(e)))?;
                }
            }
            writer
                .flush()
                .map_err(|e| Error::io("cannot flush series output", e))?;
            Ok(())
        }
    }
}
