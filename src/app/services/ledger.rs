//! Price history ledger.
//!
//! An append-only CSV file with one row per (calendar day, fuel type): the
//! mean price of that fuel across the stations that were within the session
//! radius that day. Rows are never updated or deleted; a second append for
//! the same day and fuel is a no-op, so dashboard refreshes cannot create
//! duplicates. Rewrites go through a temp file and an atomic rename so a
//! concurrent reader never sees a half-written ledger.

use crate::app::models::{FuelType, LedgerEntry, NearbyStation};
use crate::constants::MEAN_PRICE_DECIMALS;
use crate::{Error, Result};
use chrono::NaiveDate;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of a daily append call
#[derive(Debug, Clone, PartialEq)]
pub enum AppendOutcome {
    /// A new row was written
    Recorded(LedgerEntry),

    /// A row for this (date, fuel type) already exists; nothing was written
    AlreadyRecorded,

    /// No station in the set had a known price for this fuel; nothing was
    /// written
    NoPrices,
}

/// The persisted daily price ledger
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    path: PathBuf,
}

impl HistoryLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether any history has been recorded yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load all ledger rows
    ///
    /// An absent file is an empty ledger. An existing file that cannot be
    /// read or parsed is a fatal error for the operation; the ledger is
    /// never silently overwritten.
    pub fn load(&self) -> Result<Vec<LedgerEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|e| {
            Error::ledger(
                self.path.display().to_string(),
                format!("cannot open ledger file: {}", e),
            )
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let mut entries = Vec::new();
        for row in reader.deserialize::<LedgerEntry>() {
            let entry = row.map_err(|e| {
                Error::ledger(
                    self.path.display().to_string(),
                    format!("corrupt ledger row: {}", e),
                )
            })?;
            entries.push(entry);
        }

        debug!("Loaded {} ledger rows from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    /// Whether a row already exists for this date and fuel type
    pub fn contains(entries: &[LedgerEntry], date: NaiveDate, fuel: FuelType) -> bool {
        entries
            .iter()
            .any(|entry| entry.date == date && entry.fuel_type == fuel)
    }

    /// Record today's mean price for one fuel type across the nearby set
    ///
    /// Idempotent per (date, fuel type): at most one row per pair, fixed at
    /// first append of the day. Unknown prices are skipped when computing
    /// the mean; if every price is unknown the call is a no-op.
    pub fn record_daily_mean(
        &self,
        stations: &[NearbyStation],
        fuel: FuelType,
        today: NaiveDate,
    ) -> Result<AppendOutcome> {
        let Some(mean_price) = mean_known_price(stations, fuel) else {
            debug!("No known {} prices in the nearby set; ledger untouched", fuel);
            return Ok(AppendOutcome::NoPrices);
        };

        let mut entries = self.load()?;
        if Self::contains(&entries, today, fuel) {
            debug!("Ledger already has a {} row for {}", fuel, today);
            return Ok(AppendOutcome::AlreadyRecorded);
        }

        let entry = LedgerEntry {
            date: today,
            fuel_type: fuel,
            mean_price,
        };
        entries.push(entry.clone());
        self.rewrite(&entries)?;

        info!(
            "Recorded mean {} price {} for {}",
            fuel, entry.mean_price, today
        );
        Ok(AppendOutcome::Recorded(entry))
    }

    /// Rewrite the whole ledger atomically (temp file + rename)
    fn rewrite(&self, entries: &[LedgerEntry]) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::ledger(
                self.path.display().to_string(),
                format!("cannot create ledger directory: {}", e),
            )
        })?;

        let temp = tempfile::NamedTempFile::new_in(parent).map_err(|e| {
            Error::ledger(
                self.path.display().to_string(),
                format!("cannot create temp ledger file: {}", e),
            )
        })?;

        {
            let mut writer = csv::Writer::from_writer(&temp);
            for entry in entries {
                writer.serialize(entry).map_err(|e| {
                    Error::ledger(
                        self.path.display().to_string(),
                        format!("cannot write ledger row: {}", e),
                    )
                })?;
            }
            writer.flush().map_err(|e| {
                Error::ledger(
                    self.path.display().to_string(),
                    format!("cannot flush ledger: {}", e),
                )
            })?;
        }

        temp.persist(&self.path).map_err(|e| {
            Error::ledger(
                self.path.display().to_string(),
                format!("cannot replace ledger file: {}", e),
            )
        })?;

        Ok(())
    }
}

/// Mean of the known prices for one fuel across a station set
///
/// Unknown prices are excluded, never zero-filled. Returns `None` when no
/// station has a known price. The result is rounded to 3 decimal places.
pub fn mean_known_price(stations: &[NearbyStation], fuel: FuelType) -> Option<f64> {
    let known: Vec<f64> = stations
        .iter()
        .filter_map(|nearby| nearby.station.price(fuel))
        .filter(|price| price.is_finite())
        .collect();

    if known.is_empty() {
        return None;
    }

    let mean = known.iter().sum::<f64>() / known.len() as f64;
    Some(round_price(mean))
}

/// Round a price to the ledger's 3-decimal precision
pub fn round_price(value: f64) -> f64 {
    let factor = 10f64.powi(MEAN_PRICE_DECIMALS as i32);
    (value * factor).round() / factor
}
