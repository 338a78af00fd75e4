//! Trend reporting over the price history ledger.
//!
//! Filters ledger rows to a lookback window at day granularity and produces
//! the chartable time series plus window means. An empty window is the
//! "insufficient data" informational state, not an error.

use crate::app::models::{FuelType, LedgerEntry};
use crate::app::services::ledger::round_price;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// One charted point of a fuel's price series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub mean_price: f64,
}

/// Time series of one fuel over the window, with its grand mean
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelSeries {
    pub fuel: FuelType,

    /// Points in chronological order
    pub points: Vec<TrendPoint>,

    /// Mean of the window's daily means, rounded to 3 decimals
    pub grand_mean: f64,
}

/// Report for the single-fuel trend view
#[derive(Debug, Clone, PartialEq)]
pub enum TrendReport {
    /// No ledger rows fall inside the window; collect more days first
    InsufficientData,
    Series(FuelSeries),
}

/// Report for the multi-fuel comparative view
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonReport {
    InsufficientData,
    /// One series per fuel type that has rows in the window
    Series(Vec<FuelSeries>),
}

/// Build the single-fuel series over the lookback window
///
/// The window is inclusive: rows dated from `today - window_days` through
/// `today` count, compared at day granularity.
pub fn series(
    entries: &[LedgerEntry],
    fuel: FuelType,
    window_days: i64,
    today: NaiveDate,
) -> TrendReport {
    match fuel_series(entries, fuel, window_days, today) {
        Some(series) => TrendReport::Series(series),
        None => TrendReport::InsufficientData,
    }
}

/// Build the comparative per-fuel series over the lookback window
pub fn comparison(entries: &[LedgerEntry], window_days: i64, today: NaiveDate) -> ComparisonReport {
    let all: Vec<FuelSeries> = FuelType::ALL
        .into_iter()
        .filter_map(|fuel| fuel_series(entries, fuel, window_days, today))
        .collect();

    if all.is_empty() {
        ComparisonReport::InsufficientData
    } else {
        ComparisonReport::Series(all)
    }
}

fn fuel_series(
    entries: &[LedgerEntry],
    fuel: FuelType,
    window_days: i64,
    today: NaiveDate,
) -> Option<FuelSeries> {
    let cutoff = today - Duration::days(window_days);

    let mut points: Vec<TrendPoint> = entries
        .iter()
        .filter(|entry| entry.fuel_type == fuel && entry.date >= cutoff)
        .map(|entry| TrendPoint {
            date: entry.date,
            mean_price: entry.mean_price,
        })
        .collect();

    if points.is_empty() {
        return None;
    }

    points.sort_by_key(|point| point.date);
    let grand_mean =
        round_price(points.iter().map(|p| p.mean_price).sum::<f64>() / points.len() as f64);

    Some(FuelSeries {
        fuel,
        points,
        grand_mean,
    })
}
