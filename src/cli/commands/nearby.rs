//! Nearby command implementation
//!
//! Runs the full fetch → normalize → distance-filter pipeline, renders the
//! station list with directions links, and records today's mean price for
//! the selected fuel in the history ledger.

use super::shared::{print_view_failure, resolve_location, setup_logging, today};
use crate::app::models::NearbyStation;
use crate::app::services::fetch::PriceClient;
use crate::app::services::ledger::{AppendOutcome, HistoryLedger};
use crate::app::services::{distance, normalizer};
use crate::cli::args::{NearbyArgs, OutputFormat};
use crate::config::{Config, SessionContext};
use crate::constants::DIRECTIONS_LINK_COUNT;
use crate::{Error, Result};
use colored::Colorize;
use tracing::{debug, info};

/// Nearby command runner
pub fn run_nearby(args: NearbyArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet);
    args.validate()?;

    let config = Config::new(args.province.clone(), args.ledger.clone())?;
    let (latitude, longitude) = resolve_location(args.lat, args.lon, args.no_geolocate);
    let ctx = SessionContext::new(latitude, longitude, args.fuel, args.max_distance_km)?;

    info!(
        "Searching stations within {} km of ({}, {}) in province {}",
        ctx.max_distance_km, ctx.latitude, ctx.longitude, config.province_code
    );

    // Data-source and normalization failures degrade this view to an inline
    // message; they are not fatal to the process.
    let feed = match PriceClient::new()?.fetch_province(&config.province_code) {
        Ok(feed) => feed,
        Err(error) => {
            print_view_failure(&error);
            return Ok(());
        }
    };

    if let Some(updated_at) = &feed.updated_at {
        debug!("Feed updated at {}", updated_at);
    }

    let stations = match normalizer::normalize(&feed) {
        Ok(stations) => stations,
        Err(error) => {
            print_view_failure(&error);
            return Ok(());
        }
    };

    info!("{} stations with usable coordinates", stations.len());
    let nearby = distance::filter_nearby(stations, &ctx);

    render_stations(&nearby, &ctx, args.output_format)?;

    // One idempotent ledger append per day and fuel; an empty or priceless
    // station set leaves the ledger untouched.
    let ledger = HistoryLedger::new(&config.ledger_path);
    let outcome = ledger.record_daily_mean(&nearby, ctx.fuel_type, today())?;
    if args.output_format == OutputFormat::Human {
        report_outcome(&outcome, &ctx);
    }

    Ok(())
}

fn render_stations(
    nearby: &[NearbyStation],
    ctx: &SessionContext,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            render_stations_human(nearby, ctx);
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(nearby)
                .map_err(|e| Error::data_validation(format!("JSON encoding failed: {}", e)))?;
            println!("{}", json);
            Ok(())
        }
        OutputFormat::Csv => render_stations_csv(nearby, ctx),
    }
}

fn render_stations_human(nearby: &[NearbyStation], ctx: &SessionContext) {
    if nearby.is_empty() {
        println!(
            "{}",
            format!(
                "No stations within {} km of ({}, {})",
                ctx.max_distance_km, ctx.latitude, ctx.longitude
            )
            .yellow()
        );
        return;
    }

    println!(
        "{}",
        format!(
            "{} stations within {} km, nearest first ({}):",
            nearby.len(),
            ctx.max_distance_km,
            ctx.fuel_type
        )
        .bold()
    );
    for entry in nearby {
        let price = match entry.station.price(ctx.fuel_type) {
            Some(price) => format!("{:.3} EUR/L", price),
            None => "-".to_string(),
        };
        println!(
            "  {:>6.2} km  {:>11}  {} ({})",
            entry.distance_km,
            price,
            entry.station.label,
            entry.station.municipality
        );
    }

    println!();
    println!("{}", "Directions:".bold());
    for entry in nearby.iter().take(DIRECTIONS_LINK_COUNT) {
        println!(
            "  {} - {}: {}",
            entry.station.label,
            entry.station.municipality,
            directions_link(ctx, entry).underline()
        );
    }
}

fn render_stations_csv(nearby: &[NearbyStation], ctx: &SessionContext) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer
        .write_record([
            "station_id",
            "label",
            "municipality",
            "address",
            "lat",
            "lon",
            "distance_km",
            "price",
        ])
        .map_err(|e| Error::csv("cannot write station header", Some(e)))?;

    for entry in nearby {
        let price = entry
            .station
            .price(ctx.fuel_type)
            .map(|p| format!("{:.3}", p))
            .unwrap_or_default();
        writer
            .write_record([
                entry.station.station_id.clone(),
                entry.station.label.clone(),
                entry.station.municipality.clone(),
                entry.station.address.clone(),
                entry.station.lat.to_string(),
                entry.station.lon.to_string(),
                format!("{:.3}", entry.distance_km),
                price,
            ])
            .map_err(|e| Error::csv("cannot write station row", Some(e)))?;
    }

    writer
        .flush()
        .map_err(|e| Error::io("cannot flush station output", e))?;
    Ok(())
}

/// Google Maps directions link from the reference point to a station
fn directions_link(ctx: &SessionContext, entry: &NearbyStation) -> String {
    format!(
        "https://www.google.com/maps/dir/{},{}/{},{}",
        ctx.latitude, ctx.longitude, entry.station.lat, entry.station.lon
    )
}

fn report_outcome(outcome: &AppendOutcome, ctx: &SessionContext) {
    println!();
    match outcome {
        AppendOutcome::Recorded(entry) => println!(
            "{}",
            format!(
                "✓ Recorded mean {} price {:.3} EUR/L for {}",
                ctx.fuel_type, entry.mean_price, entry.date
            )
            .green()
        ),
        AppendOutcome::AlreadyRecorded => println!(
            "{}",
            format!("Mean {} price already recorded today", ctx.fuel_type).dimmed()
        ),
        AppendOutcome::NoPrices => println!(
            "{}",
            format!(
                "No known {} prices in the current station set; nothing recorded",
                ctx.fuel_type
            )
            .dimmed()
        ),
    }
}
