//! Distance computation and radius filtering.
//!
//! Computes great-circle distances from the session reference point and
//! restricts the station set to the configured radius, sorted nearest-first.

use crate::app::models::{NearbyStation, StationRecord};
use crate::config::SessionContext;
use std::cmp::Ordering;
use tracing::debug;

/// Mean Earth radius of the WGS84 ellipsoid, in kilometers
const MEAN_EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two (latitude, longitude) points, in km
///
/// Haversine formula on the WGS84 mean-radius sphere. Returns `None` when
/// either point is non-finite or outside valid coordinate ranges; the
/// distance from a point to itself is exactly 0.0.
pub fn great_circle_km(origin: (f64, f64), point: (f64, f64)) -> Option<f64> {
    let (lat1, lon1) = origin;
    let (lat2, lon2) = point;

    for &(lat, lon) in &[origin, point] {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
    }

    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Some(MEAN_EARTH_RADIUS_KM * c)
}

/// Filter stations to those within the session radius, nearest first
///
/// Stations whose distance cannot be computed are excluded (an unknown
/// distance never satisfies the radius comparison). The sort is stable, so
/// equidistant stations keep their feed order.
pub fn filter_nearby(stations: Vec<StationRecord>, ctx: &SessionContext) -> Vec<NearbyStation> {
    let origin = ctx.location();

    let mut nearby: Vec<NearbyStation> = stations
        .into_iter()
        .filter_map(|station| {
            let distance_km = great_circle_km(origin, station.location())?;
            if distance_km <= ctx.max_distance_km {
                Some(NearbyStation {
                    station,
                    distance_km,
                })
            } else {
                None
            }
        })
        .collect();

    nearby.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });

    debug!(
        "{} stations within {} km of ({}, {})",
        nearby.len(),
        ctx.max_distance_km,
        ctx.latitude,
        ctx.longitude
    );
    nearby
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::FuelType;
    use std::collections::HashMap;

    fn station_at(id: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord {
            station_id: id.to_string(),
            municipality_id: String::new(),
            province_id: String::new(),
            label: String::new(),
            municipality: String::new(),
            address: String::new(),
            schedule: String::new(),
            postal_code: String::new(),
            lat,
            lon,
            prices: HashMap::new(),
        }
    }

    fn test_ctx(max_distance_km: f64) -> SessionContext {
        SessionContext::new(41.387027, 2.170024, FuelType::GasoleoA, max_distance_km).unwrap()
    }

    #[test]
    fn test_distance_to_same_point_is_exactly_zero() {
        let point = (41.387027, 2.170024);
        assert_eq!(great_circle_km(point, point), Some(0.0));
    }

    #[test]
    fn test_distance_known_pair() {
        // Barcelona to Madrid, roughly 505 km
        let km = great_circle_km((41.387027, 2.170024), (40.4168, -3.7038)).unwrap();
        assert!((km - 505.0).abs() < 5.0, "got {} km", km);
    }

    #[test]
    fn test_distance_invalid_inputs_are_unknown() {
        let origin = (41.387027, 2.170024);
        assert_eq!(great_circle_km(origin, (f64::NAN, 2.0)), None);
        assert_eq!(great_circle_km(origin, (95.0, 2.0)), None);
        assert_eq!(great_circle_km((200.0, 0.0), (41.0, 2.0)), None);
    }

    #[test]
    fn test_filter_sorted_ascending_within_radius() {
        let stations = vec![
            station_at("far", 41.60, 2.30),
            station_at("near", 41.39, 2.18),
            station_at("mid", 41.45, 2.20),
        ];

        let nearby = filter_nearby(stations, &test_ctx(25.0));

        assert!(!nearby.is_empty());
        for pair in nearby.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
        for station in &nearby {
            assert!(station.distance_km <= 25.0);
        }
        assert_eq!(nearby[0].station.station_id, "near");
    }

    #[test]
    fn test_filter_excludes_stations_outside_radius() {
        let stations = vec![
            station_at("inside", 41.39, 2.18),
            // Madrid, far outside a 25 km radius of Barcelona
            station_at("outside", 40.4168, -3.7038),
        ];

        let nearby = filter_nearby(stations, &test_ctx(25.0));
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].station.station_id, "inside");
    }

    #[test]
    fn test_filter_zero_matches_is_empty_not_error() {
        let stations = vec![station_at("madrid", 40.4168, -3.7038)];
        let nearby = filter_nearby(stations, &test_ctx(25.0));
        assert!(nearby.is_empty());
    }

    #[test]
    fn test_filter_excludes_unknown_distance_rows() {
        let stations = vec![
            station_at("good", 41.39, 2.18),
            station_at("bad", f64::NAN, 2.18),
        ];

        let nearby = filter_nearby(stations, &test_ctx(25.0));
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].station.station_id, "good");
    }

    #[test]
    fn test_filter_station_at_reference_point() {
        let stations = vec![station_at("here", 41.387027, 2.170024)];
        let nearby = filter_nearby(stations, &test_ctx(25.0));
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].distance_km, 0.0);
    }

    #[test]
    fn test_filter_stable_for_equidistant_stations() {
        // Same coordinate, so identical distance; feed order must be kept
        let stations = vec![
            station_at("first", 41.39, 2.18),
            station_at("second", 41.39, 2.18),
        ];

        let nearby = filter_nearby(stations, &test_ctx(25.0));
        assert_eq!(nearby[0].station.station_id, "first");
        assert_eq!(nearby[1].station.station_id, "second");
    }
}
