//! Application constants for fuelwatch
//!
//! This module contains endpoint URLs, raw feed column names, default values
//! and limits used throughout the fuel price pipeline.

// =============================================================================
// External Endpoints
// =============================================================================

/// Base URL of the Ministry's per-province price endpoint; the province code
/// is appended as the final path segment.
pub const PRICE_API_BASE_URL: &str =
    "https://energia.serviciosmin.gob.es/ServiciosRESTCarburantes/PreciosCarburantes/EstacionesTerrestres/FiltroProvincia";

/// IP-based geolocation endpoint returning a JSON body with `lat`/`lon` fields
pub const GEOLOCATION_URL: &str = "http://ip-api.com/json";

/// HTTP timeout for both endpoints, in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Transport failures are retried once before surfacing an error
pub const HTTP_RETRIES: usize = 1;

// =============================================================================
// Raw Feed Column Names
// =============================================================================

/// Field names in the raw price feed, as published by the API
pub mod feed_fields {
    /// Top-level list of station records
    pub const STATION_LIST: &str = "ListaEESSPrecio";

    /// Top-level feed update timestamp
    pub const UPDATED_AT: &str = "Fecha";

    pub const LATITUDE: &str = "Latitud";
    pub const LONGITUDE: &str = "Longitud (WGS84)";
    pub const ADDRESS: &str = "Dirección";
    pub const SCHEDULE: &str = "Horario";
    pub const LABEL: &str = "Rótulo";
    pub const MUNICIPALITY: &str = "Municipio";
    pub const POSTAL_CODE: &str = "C.P.";
    pub const STATION_ID: &str = "IDEESS";
    pub const MUNICIPALITY_ID: &str = "IDMunicipio";
    pub const PROVINCE_ID: &str = "IDProvincia";
}

// =============================================================================
// Defaults and Limits
// =============================================================================

/// Province code queried when none is given (08 = Barcelona)
pub const DEFAULT_PROVINCE_CODE: &str = "08";

/// Fallback reference coordinate when geolocation fails and none is given
/// (Madrid city centre)
pub const DEFAULT_LATITUDE: f64 = 40.4168;
pub const DEFAULT_LONGITUDE: f64 = -3.7038;

/// Search radius defaults and bounds, in kilometers
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 25.0;
pub const MIN_MAX_DISTANCE_KM: f64 = 5.0;
pub const MAX_MAX_DISTANCE_KM: f64 = 100.0;

/// Fixed lookback window of the single-fuel trend view, in days
pub const TREND_WINDOW_DAYS: i64 = 14;

/// Bounds and default of the comparative view's lookback window, in days
pub const MIN_COMPARE_WINDOW_DAYS: i64 = 3;
pub const MAX_COMPARE_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_COMPARE_WINDOW_DAYS: i64 = 14;

/// Number of directions links printed by the nearby view
pub const DIRECTIONS_LINK_COUNT: usize = 5;

/// File name of the price history ledger inside the data directory
pub const LEDGER_FILE_NAME: &str = "historial_precios.csv";

/// Mean prices are rounded to this many decimal places before recording
pub const MEAN_PRICE_DECIMALS: u32 = 3;
