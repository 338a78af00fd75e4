//! Fuelwatch Library
//!
//! A Rust library for tracking Spanish service-station fuel prices from the
//! Ministry's open pricing API.
//!
//! This library provides tools for:
//! - Fetching per-province price feeds and normalizing the raw records
//! - Filtering stations by great-circle distance from a reference point
//! - Keeping an append-only daily ledger of mean prices per fuel type
//! - Reporting price trends over a lookback window

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod distance;
        pub mod fetch;
        pub mod ledger;
        pub mod normalizer;
        pub mod trend;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FuelType, LedgerEntry, NearbyStation, StationRecord};
pub use config::{Config, SessionContext};

/// Result type alias for fuelwatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the fuel price pipeline
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Price feed could not be fetched or parsed
    #[error("data source error: {message}")]
    DataSource {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Raw station records could not be normalized
    #[error("normalization failed: {message}")]
    Normalization { message: String },

    /// Ledger file error
    #[error("ledger error in '{path}': {message}")]
    Ledger { path: String, message: String },

    /// CSV reading or writing error
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("data validation error: {message}")]
    DataValidation { message: String },

    /// Date parsing error
    #[error("date parsing error: {message}")]
    DateParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a data source error with context
    pub fn data_source(message: impl Into<String>, source: Option<reqwest::Error>) -> Self {
        Self::DataSource {
            message: message.into(),
            source,
        }
    }

    /// Create a normalization error
    pub fn normalization(message: impl Into<String>) -> Self {
        Self::Normalization {
            message: message.into(),
        }
    }

    /// Create a ledger error
    pub fn ledger(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Ledger {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a CSV error with context
    pub fn csv(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::Csv {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a date parsing error
    pub fn date_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateParsing {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::DataSource {
            message: "HTTP request failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            message: "CSV processing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateParsing {
            message: "date parsing failed".to_string(),
            source: error,
        }
    }
}
