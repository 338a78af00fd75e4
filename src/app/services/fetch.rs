//! HTTP adapters for the price feed and IP geolocation.
//!
//! Both endpoints are treated as best-effort collaborators: the price client
//! retries a transport failure once before surfacing a data-source error,
//! and the geolocation client degrades to `None` so the caller can fall back
//! to explicit coordinates.

use crate::constants::{GEOLOCATION_URL, HTTP_RETRIES, HTTP_TIMEOUT_SECS, PRICE_API_BASE_URL, feed_fields};
use crate::{Error, Result};
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Raw per-province price feed, before normalization
///
/// The station list is kept untyped: the upstream schema is not guaranteed,
/// and unexpected shapes must degrade to "no data" in the normalizer rather
/// than fail the fetch.
#[derive(Debug, Clone, Default)]
pub struct PriceFeed {
    /// Raw station records as published under `ListaEESSPrecio`
    pub stations: Vec<Map<String, Value>>,

    /// Feed update timestamp as published under `Fecha`, if present
    pub updated_at: Option<String>,
}

/// Blocking client for the Ministry's per-province price endpoint
pub struct PriceClient {
    client: Client,
    base_url: String,
}

impl PriceClient {
    /// Create a client with the standard timeout against the public endpoint
    pub fn new() -> Result<Self> {
        Self::with_base_url(PRICE_API_BASE_URL)
    }

    /// Create a client against a custom base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::data_source("failed to build HTTP client", Some(e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the raw price feed for one province
    ///
    /// Performs a single GET with one retry on transport failure. A payload
    /// that is not a JSON object is a data-source error; a missing station
    /// list yields an empty feed.
    pub fn fetch_province(&self, province_code: &str) -> Result<PriceFeed> {
        let url = format!("{}/{}", self.base_url, province_code);
        debug!("Fetching price feed: {}", url);

        let mut last_error = None;
        for attempt in 0..=HTTP_RETRIES {
            match self.try_fetch(&url) {
                Ok(feed) => {
                    debug!(
                        "Price feed fetched: {} raw stations, updated {}",
                        feed.stations.len(),
                        feed.updated_at.as_deref().unwrap_or("unknown")
                    );
                    return Ok(feed);
                }
                Err(e) => {
                    if attempt < HTTP_RETRIES {
                        warn!("Price feed fetch failed (attempt {}): {}", attempt + 1, e);
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::data_source("price feed fetch failed with no attempts", None)
        }))
    }

    fn try_fetch(&self, url: &str) -> Result<PriceFeed> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::data_source("price feed request failed", Some(e)))?
            .error_for_status()
            .map_err(|e| Error::data_source("price feed returned an error status", Some(e)))?;

        let payload: Value = response
            .json()
            .map_err(|e| Error::data_source("price feed body is not valid JSON", Some(e)))?;

        parse_feed(payload)
    }
}

/// Extract the station list and update timestamp from a feed payload
pub fn parse_feed(payload: Value) -> Result<PriceFeed> {
    let object = match payload {
        Value::Object(object) => object,
        other => {
            return Err(Error::data_source(
                format!("price feed payload is not a JSON object (got {})", json_kind(&other)),
                None,
            ));
        }
    };

    let updated_at = object
        .get(feed_fields::UPDATED_AT)
        .and_then(Value::as_str)
        .map(str::to_string);

    let stations = match object.get(feed_fields::STATION_LIST) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect(),
        // Schema drift: a missing or reshaped list degrades to no data
        _ => Vec::new(),
    };

    Ok(PriceFeed {
        stations,
        updated_at,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Geolocation
// =============================================================================

/// An approximate (latitude, longitude) pair from IP geolocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Best-effort IP geolocation lookup
///
/// Returns `None` on any failure; the caller decides the fallback (explicit
/// flags or the fixed default coordinates).
pub fn locate_by_ip() -> Option<Coordinates> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .ok()?;

    let payload: Value = client.get(GEOLOCATION_URL).send().ok()?.json().ok()?;

    let latitude = payload.get("lat")?.as_f64()?;
    let longitude = payload.get("lon")?.as_f64()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }

    debug!("IP geolocation resolved: ({}, {})", latitude, longitude);
    Some(Coordinates {
        latitude,
        longitude,
    })
}
