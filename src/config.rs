//! Configuration management and validation.
//!
//! Provides the process-level configuration (province scope, ledger
//! location) and the per-session context value object that carries the
//! user-selected parameters into each pipeline component.

use crate::app::models::FuelType;
use crate::constants::{
    DEFAULT_MAX_DISTANCE_KM, DEFAULT_PROVINCE_CODE, LEDGER_FILE_NAME, MAX_MAX_DISTANCE_KM,
    MIN_MAX_DISTANCE_KM,
};
use crate::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Process-level configuration for a fuelwatch run
#[derive(Debug, Clone)]
pub struct Config {
    /// Administrative province code scoping the price feed query
    pub province_code: String,

    /// Location of the price history ledger file
    pub ledger_path: PathBuf,
}

impl Config {
    /// Build a configuration, falling back to defaults for unset values
    pub fn new(province_code: Option<String>, ledger_path: Option<PathBuf>) -> Result<Self> {
        let config = Self {
            province_code: province_code
                .unwrap_or_else(|| DEFAULT_PROVINCE_CODE.to_string()),
            ledger_path: ledger_path.unwrap_or_else(Self::default_ledger_path),
        };

        config.validate()?;
        debug!(
            "Configuration loaded: province={}, ledger={}",
            config.province_code,
            config.ledger_path.display()
        );
        Ok(config)
    }

    /// Default ledger location under the platform data directory
    ///
    /// Falls back to a `./dat` subdirectory of the working directory when no
    /// platform data directory can be determined.
    pub fn default_ledger_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("fuelwatch"))
            .unwrap_or_else(|| PathBuf::from("./dat"))
            .join(LEDGER_FILE_NAME)
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        let code = self.province_code.trim();
        if code.is_empty() {
            return Err(Error::configuration(
                "Province code cannot be empty".to_string(),
            ));
        }
        if !code.chars().all(|c| c.is_ascii_digit()) || code.len() != 2 {
            return Err(Error::configuration(format!(
                "Invalid province code '{}': expected two digits (e.g. 08 for Barcelona)",
                code
            )));
        }

        Ok(())
    }
}

/// User-selected parameters shared by the pipeline components
///
/// Every view receives the same explicit session context rather than reading
/// ambient state, so the parameters a report was computed from are always
/// visible at the call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionContext {
    /// Reference latitude in WGS84 decimal degrees
    pub latitude: f64,

    /// Reference longitude in WGS84 decimal degrees
    pub longitude: f64,

    /// Fuel type selected for the session
    pub fuel_type: FuelType,

    /// Maximum station distance from the reference point, in kilometers
    pub max_distance_km: f64,
}

impl SessionContext {
    pub fn new(
        latitude: f64,
        longitude: f64,
        fuel_type: FuelType,
        max_distance_km: f64,
    ) -> Result<Self> {
        let ctx = Self {
            latitude,
            longitude,
            fuel_type,
            max_distance_km,
        };

        ctx.validate()?;
        Ok(ctx)
    }

    /// Reference location as a (latitude, longitude) pair
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Validate session parameters for consistency and valid ranges
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::configuration(format!(
                "Invalid reference latitude {}: must be between -90 and 90 degrees",
                self.latitude
            )));
        }

        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::configuration(format!(
                "Invalid reference longitude {}: must be between -180 and 180 degrees",
                self.longitude
            )));
        }

        if !(MIN_MAX_DISTANCE_KM..=MAX_MAX_DISTANCE_KM).contains(&self.max_distance_km) {
            return Err(Error::configuration(format!(
                "Invalid search radius {} km: must be between {} and {} km",
                self.max_distance_km, MIN_MAX_DISTANCE_KM, MAX_MAX_DISTANCE_KM
            )));
        }

        Ok(())
    }
}
