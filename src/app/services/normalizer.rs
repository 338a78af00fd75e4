//! Station dataset normalizer.
//!
//! Transforms the raw, untyped price feed into canonical typed station
//! records: locale decimal commas become points, prices become numeric or
//! unknown, coordinates are coerced and range-checked, and rows that cannot
//! be geolocated are dropped.

use crate::app::models::{FuelType, StationRecord};
use crate::app::services::fetch::PriceFeed;
use crate::constants::feed_fields;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Normalize a raw price feed into canonical station records
///
/// Rows with missing or unparseable coordinates are dropped. A non-empty
/// feed from which nothing can be normalized signals schema drift and is
/// reported as a normalization failure; the caller must treat that as "no
/// data available" for the cycle.
pub fn normalize(feed: &PriceFeed) -> Result<Vec<StationRecord>> {
    let total = feed.stations.len();
    let stations: Vec<StationRecord> = feed
        .stations
        .iter()
        .filter_map(normalize_record)
        .collect();

    let dropped = total - stations.len();
    if dropped > 0 {
        debug!(
            "Dropped {} of {} raw stations without usable coordinates",
            dropped, total
        );
    }

    if stations.is_empty() && total > 0 {
        warn!("No station could be normalized from {} raw records", total);
        return Err(Error::normalization(format!(
            "none of the {} raw station records had usable coordinates; \
             the feed schema may have changed",
            total
        )));
    }

    debug!("Normalized {} stations", stations.len());
    Ok(stations)
}

/// Normalize a single raw record, or `None` if it cannot be geolocated
fn normalize_record(raw: &Map<String, Value>) -> Option<StationRecord> {
    let lat = parse_decimal(&text_field(raw, feed_fields::LATITUDE))?;
    let lon = parse_decimal(&text_field(raw, feed_fields::LONGITUDE))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }

    let mut prices = HashMap::new();
    for fuel in FuelType::ALL {
        if let Some(price) = parse_decimal(&text_field(raw, fuel.feed_column())) {
            prices.insert(fuel, price);
        }
    }

    Some(StationRecord {
        station_id: text_field(raw, feed_fields::STATION_ID),
        municipality_id: text_field(raw, feed_fields::MUNICIPALITY_ID),
        province_id: text_field(raw, feed_fields::PROVINCE_ID),
        label: text_field(raw, feed_fields::LABEL),
        municipality: text_field(raw, feed_fields::MUNICIPALITY),
        address: text_field(raw, feed_fields::ADDRESS),
        schedule: text_field(raw, feed_fields::SCHEDULE),
        postal_code: text_field(raw, feed_fields::POSTAL_CODE),
        lat,
        lon,
        prices,
    })
}

/// Read a string field from a raw record; missing columns are silently empty
fn text_field(raw: &Map<String, Value>, field: &str) -> String {
    raw.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Parse a locale-formatted decimal string (comma as decimal separator)
///
/// Empty strings are unknown values, never zero.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
