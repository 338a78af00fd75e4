//! Data models for the fuel price pipeline
//!
//! This module contains the core data structures for canonical station
//! records, distance-annotated stations and ledger rows, following the
//! field names published by the Ministry's price feed.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

// =============================================================================
// Fuel Types
// =============================================================================

/// The fixed set of fuel categories tracked by the dashboard
///
/// Each variant maps to the price column the feed publishes for it. The same
/// column name is used as the `Combustible` value in the history ledger, so
/// ledgers written by the original dashboard remain readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    GasoleoA,
    Gasolina95E5,
    Gasolina95E5Premium,
}

impl FuelType {
    /// All tracked fuel types, in display order
    pub const ALL: [FuelType; 3] = [
        FuelType::Gasolina95E5,
        FuelType::GasoleoA,
        FuelType::Gasolina95E5Premium,
    ];

    /// Name of the price column in the raw feed (also the ledger value)
    pub fn feed_column(&self) -> &'static str {
        match self {
            FuelType::GasoleoA => "Precio Gasoleo A",
            FuelType::Gasolina95E5 => "Precio Gasolina 95 E5",
            FuelType::Gasolina95E5Premium => "Precio Gasolina 95 E5 Premium",
        }
    }

    /// Kebab-case name used on the command line
    pub fn cli_name(&self) -> &'static str {
        match self {
            FuelType::GasoleoA => "gasoleo-a",
            FuelType::Gasolina95E5 => "gasolina-95-e5",
            FuelType::Gasolina95E5Premium => "gasolina-95-e5-premium",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::GasoleoA => "Gasóleo A",
            FuelType::Gasolina95E5 => "Gasolina 95 E5",
            FuelType::Gasolina95E5Premium => "Gasolina 95 E5 Premium",
        }
    }

    /// Resolve a fuel type from its feed column name
    pub fn from_feed_column(column: &str) -> Option<FuelType> {
        FuelType::ALL
            .into_iter()
            .find(|fuel| fuel.feed_column() == column)
    }
}

impl FromStr for FuelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        FuelType::ALL
            .into_iter()
            .find(|fuel| {
                fuel.cli_name().eq_ignore_ascii_case(trimmed) || fuel.feed_column() == trimmed
            })
            .ok_or_else(|| {
                Error::data_validation(format!(
                    "Unknown fuel type '{}'. Available: {}",
                    trimmed,
                    FuelType::ALL
                        .iter()
                        .map(|f| f.cli_name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// The ledger stores the feed column name, so serde round-trips through it.
impl Serialize for FuelType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.feed_column())
    }
}

impl<'de> Deserialize<'de> for FuelType {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        FuelType::from_feed_column(&value)
            .ok_or_else(|| de::Error::custom(format!("unknown fuel column '{}'", value)))
    }
}

// =============================================================================
// Station Records
// =============================================================================

/// One canonical service-station row from a normalized price feed
///
/// Coordinates are guaranteed present and within WGS84 ranges; rows that
/// cannot be geolocated never leave the normalizer. Prices are per fuel
/// type and absent when the feed published an empty value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    /// Station identifier (IDEESS)
    pub station_id: String,

    /// Municipality identifier (IDMunicipio)
    pub municipality_id: String,

    /// Province identifier (IDProvincia)
    pub province_id: String,

    /// Brand sign of the station (Rótulo)
    pub label: String,

    /// Municipality name
    pub municipality: String,

    /// Street address
    pub address: String,

    /// Opening schedule
    pub schedule: String,

    /// Postal code
    pub postal_code: String,

    /// Latitude in WGS84 decimal degrees
    pub lat: f64,

    /// Longitude in WGS84 decimal degrees
    pub lon: f64,

    /// Known prices per fuel type; absent key means the station does not
    /// publish that fuel (never zero-filled)
    pub prices: HashMap<FuelType, f64>,
}

impl StationRecord {
    /// Price of a fuel type at this station, if published
    pub fn price(&self, fuel: FuelType) -> Option<f64> {
        self.prices.get(&fuel).copied()
    }

    /// Station location as a (latitude, longitude) pair
    pub fn location(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }

    /// Validate coordinate invariants
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::data_validation(format!(
                "Invalid latitude {}: must be finite and between -90 and 90 degrees",
                self.lat
            )));
        }

        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(Error::data_validation(format!(
                "Invalid longitude {}: must be finite and between -180 and 180 degrees",
                self.lon
            )));
        }

        Ok(())
    }
}

/// A station annotated with its distance from the session's reference point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyStation {
    #[serde(flatten)]
    pub station: StationRecord,

    /// Great-circle distance from the reference coordinate, in kilometers
    pub distance_km: f64,
}

// =============================================================================
// Ledger Rows
// =============================================================================

/// One row of the price history ledger
///
/// Represents the mean price of one fuel type across the stations that were
/// within the session radius on one calendar day. At most one row exists per
/// (date, fuel type) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Calendar day the mean was recorded on (no time component)
    #[serde(rename = "Fecha")]
    pub date: NaiveDate,

    /// Fuel type, stored as its feed column name
    #[serde(rename = "Combustible")]
    pub fuel_type: FuelType,

    /// Mean price across the nearby station set, rounded to 3 decimals
    #[serde(rename = "Precio Medio")]
    pub mean_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_station(id: &str, lat: f64, lon: f64) -> StationRecord {
        let mut prices = HashMap::new();
        prices.insert(FuelType::GasoleoA, 1.479);
        prices.insert(FuelType::Gasolina95E5, 1.562);

        StationRecord {
            station_id: id.to_string(),
            municipality_id: "2075".to_string(),
            province_id: "08".to_string(),
            label: "REPSOL".to_string(),
            municipality: "Barcelona".to_string(),
            address: "CALLE ARAGON 1".to_string(),
            schedule: "L-D: 24H".to_string(),
            postal_code: "08015".to_string(),
            lat,
            lon,
            prices,
        }
    }

    #[test]
    fn test_fuel_type_feed_columns_round_trip() {
        for fuel in FuelType::ALL {
            assert_eq!(FuelType::from_feed_column(fuel.feed_column()), Some(fuel));
        }
        assert_eq!(FuelType::from_feed_column("Precio Biodiesel"), None);
    }

    #[test]
    fn test_fuel_type_from_str() {
        assert_eq!(
            FuelType::from_str("gasoleo-a").unwrap(),
            FuelType::GasoleoA
        );
        assert_eq!(
            FuelType::from_str("GASOLINA-95-E5").unwrap(),
            FuelType::Gasolina95E5
        );
        // Feed column spellings are accepted too
        assert_eq!(
            FuelType::from_str("Precio Gasolina 95 E5 Premium").unwrap(),
            FuelType::Gasolina95E5Premium
        );
        assert!(FuelType::from_str("kerosene").is_err());
    }

    #[test]
    fn test_station_price_lookup() {
        let station = test_station("1234", 41.38, 2.17);
        assert_eq!(station.price(FuelType::GasoleoA), Some(1.479));
        assert_eq!(station.price(FuelType::Gasolina95E5Premium), None);
    }

    #[test]
    fn test_station_coordinate_validation() {
        let mut station = test_station("1234", 41.38, 2.17);
        assert!(station.validate().is_ok());

        station.lat = 95.0;
        assert!(station.validate().is_err());

        station.lat = 41.38;
        station.lon = -185.0;
        assert!(station.validate().is_err());

        station.lon = f64::NAN;
        assert!(station.validate().is_err());
    }

    #[test]
    fn test_ledger_entry_serde() {
        let entry = LedgerEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            fuel_type: FuelType::GasoleoA,
            mean_price: 1.5,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"Fecha\":\"2024-01-01\""));
        assert!(json.contains("\"Combustible\":\"Precio Gasoleo A\""));

        let back: LedgerEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
