//! Integration tests for the normalize → filter → ledger → trend pipeline
//!
//! Exercises the full flow on realistic feed payloads and a ledger in a
//! temporary directory, the way a daily `nearby` run followed by the report
//! views would.

use chrono::NaiveDate;
use fuelwatch::app::services::fetch::parse_feed;
use fuelwatch::app::services::ledger::{AppendOutcome, HistoryLedger};
use fuelwatch::app::services::trend::{self, ComparisonReport, TrendReport};
use fuelwatch::app::services::{distance, normalizer};
use fuelwatch::app::models::{FuelType, NearbyStation};
use fuelwatch::config::SessionContext;
use serde_json::json;
use tempfile::TempDir;

fn barcelona_feed() -> serde_json::Value {
    json!({
        "Fecha": "27/08/2026 8:00:00",
        "ResultadoConsulta": "OK",
        "ListaEESSPrecio": [
            {
                "IDEESS": "4412",
                "IDMunicipio": "2075",
                "IDProvincia": "08",
                "Rótulo": "REPSOL",
                "Municipio": "Barcelona",
                "Dirección": "CALLE ARAGON 1",
                "Horario": "L-D: 24H",
                "C.P.": "08015",
                "Latitud": "41,390000",
                "Longitud (WGS84)": "2,180000",
                "Precio Gasoleo A": "1,479",
                "Precio Gasolina 95 E5": "1,562",
                "Precio Gasolina 95 E5 Premium": ""
            },
            {
                "IDEESS": "4413",
                "IDMunicipio": "2075",
                "IDProvincia": "08",
                "Rótulo": "CEPSA",
                "Municipio": "Barcelona",
                "Dirección": "GRAN VIA 200",
                "Horario": "L-D: 06:00-22:00",
                "C.P.": "08004",
                "Latitud": "41,370000",
                "Longitud (WGS84)": "2,150000",
                "Precio Gasoleo A": "1,499",
                "Precio Gasolina 95 E5": "1,582",
                "Precio Gasolina 95 E5 Premium": "1,699"
            },
            {
                // Far station, outside any Barcelona radius
                "IDEESS": "9001",
                "IDMunicipio": "0001",
                "IDProvincia": "28",
                "Rótulo": "MADRID SUR",
                "Municipio": "Madrid",
                "Dirección": "A-4 KM 10",
                "Horario": "L-D: 24H",
                "C.P.": "28041",
                "Latitud": "40,350000",
                "Longitud (WGS84)": "-3,700000",
                "Precio Gasoleo A": "1,399",
                "Precio Gasolina 95 E5": "1,502",
                "Precio Gasolina 95 E5 Premium": "1,602"
            },
            {
                // Not geolocatable, must be dropped by the normalizer
                "IDEESS": "9002",
                "Rótulo": "SIN COORDENADAS",
                "Latitud": "",
                "Longitud (WGS84)": "",
                "Precio Gasoleo A": "1,000"
            }
        ]
    })
}

fn barcelona_ctx(fuel: FuelType) -> SessionContext {
    SessionContext::new(41.387027, 2.170024, fuel, 25.0).unwrap()
}

fn nearby_stations(fuel: FuelType) -> Vec<NearbyStation> {
    let feed = parse_feed(barcelona_feed()).unwrap();
    let stations = normalizer::normalize(&feed).unwrap();
    distance::filter_nearby(stations, &barcelona_ctx(fuel))
}

fn day(date: &str) -> NaiveDate {
    date.parse().unwrap()
}

#[test]
fn test_feed_to_nearby_stations() {
    let feed = parse_feed(barcelona_feed()).unwrap();
    assert_eq!(feed.stations.len(), 4);
    assert_eq!(feed.updated_at.as_deref(), Some("27/08/2026 8:00:00"));

    let stations = normalizer::normalize(&feed).unwrap();
    // The coordinate-less station is gone
    assert_eq!(stations.len(), 3);

    let nearby = nearby_stations(FuelType::GasoleoA);
    // The Madrid station is outside the 25 km radius
    assert_eq!(nearby.len(), 2);
    assert_eq!(nearby[0].station.station_id, "4412");
    assert!(nearby[0].distance_km <= nearby[1].distance_km);
    for entry in &nearby {
        assert!(entry.distance_km <= 25.0);
    }
}

#[test]
fn test_daily_run_records_one_row_per_fuel() {
    let dir = TempDir::new().unwrap();
    let ledger = HistoryLedger::new(dir.path().join("dat").join("historial_precios.csv"));
    let today = day("2026-08-27");

    let nearby = nearby_stations(FuelType::GasoleoA);
    let outcome = ledger
        .record_daily_mean(&nearby, FuelType::GasoleoA, today)
        .unwrap();

    // Mean of 1.479 and 1.499
    let AppendOutcome::Recorded(entry) = outcome else {
        panic!("expected a recorded entry");
    };
    assert_eq!(entry.mean_price, 1.489);

    // A refresh later the same day is a no-op, even from another location
    let wider = {
        let feed = parse_feed(barcelona_feed()).unwrap();
        let stations = normalizer::normalize(&feed).unwrap();
        let ctx = SessionContext::new(40.4168, -3.7038, FuelType::GasoleoA, 25.0).unwrap();
        distance::filter_nearby(stations, &ctx)
    };
    assert_eq!(wider.len(), 1);
    let outcome = ledger
        .record_daily_mean(&wider, FuelType::GasoleoA, today)
        .unwrap();
    assert_eq!(outcome, AppendOutcome::AlreadyRecorded);

    let entries = ledger.load().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].mean_price, 1.489);
}

#[test]
fn test_premium_mean_ignores_unknown_prices() {
    let dir = TempDir::new().unwrap();
    let ledger = HistoryLedger::new(dir.path().join("historial_precios.csv"));

    let nearby = nearby_stations(FuelType::Gasolina95E5Premium);
    let outcome = ledger
        .record_daily_mean(&nearby, FuelType::Gasolina95E5Premium, day("2026-08-27"))
        .unwrap();

    // Only one of the two nearby stations publishes premium; its price is
    // the mean, not an average with a zero-filled unknown
    let AppendOutcome::Recorded(entry) = outcome else {
        panic!("expected a recorded entry");
    };
    assert_eq!(entry.mean_price, 1.699);
}

#[test]
fn test_empty_radius_leaves_ledger_untouched() {
    let dir = TempDir::new().unwrap();
    let ledger = HistoryLedger::new(dir.path().join("historial_precios.csv"));

    let feed = parse_feed(barcelona_feed()).unwrap();
    let stations = normalizer::normalize(&feed).unwrap();
    // Reference point in the Atlantic, nothing within 25 km
    let ctx = SessionContext::new(30.0, -40.0, FuelType::GasoleoA, 25.0).unwrap();
    let nearby = distance::filter_nearby(stations, &ctx);
    assert!(nearby.is_empty());

    let outcome = ledger
        .record_daily_mean(&nearby, FuelType::GasoleoA, day("2026-08-27"))
        .unwrap();
    assert_eq!(outcome, AppendOutcome::NoPrices);
    assert!(!ledger.exists());
}

#[test]
fn test_multi_day_history_feeds_trend_reports() {
    let dir = TempDir::new().unwrap();
    let ledger = HistoryLedger::new(dir.path().join("historial_precios.csv"));
    let nearby = nearby_stations(FuelType::GasoleoA);

    // Simulate three daily sessions
    for date in ["2026-08-25", "2026-08-26", "2026-08-27"] {
        let outcome = ledger
            .record_daily_mean(&nearby, FuelType::GasoleoA, day(date))
            .unwrap();
        assert!(matches!(outcome, AppendOutcome::Recorded(_)));
    }
    ledger
        .record_daily_mean(&nearby, FuelType::Gasolina95E5, day("2026-08-27"))
        .unwrap();

    let entries = ledger.load().unwrap();
    assert_eq!(entries.len(), 4);

    let report = trend::series(&entries, FuelType::GasoleoA, 14, day("2026-08-27"));
    let TrendReport::Series(series) = report else {
        panic!("expected a series");
    };
    assert_eq!(series.points.len(), 3);
    assert_eq!(series.points[0].date, day("2026-08-25"));
    assert_eq!(series.grand_mean, 1.489);

    let report = trend::comparison(&entries, 14, day("2026-08-27"));
    let ComparisonReport::Series(all) = report else {
        panic!("expected series");
    };
    assert_eq!(all.len(), 2);

    // A window that misses everything is the informational empty state
    let report = trend::series(&entries, FuelType::GasoleoA, 14, day("2027-06-01"));
    assert_eq!(report, TrendReport::InsufficientData);
}

#[test]
fn test_ledger_survives_sessions_and_interleaves_fuels() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("historial_precios.csv");
    let nearby = nearby_stations(FuelType::GasoleoA);

    {
        let ledger = HistoryLedger::new(&path);
        ledger
            .record_daily_mean(&nearby, FuelType::GasoleoA, day("2026-08-26"))
            .unwrap();
    }

    // A separate process invocation the next day
    let ledger = HistoryLedger::new(&path);
    ledger
        .record_daily_mean(&nearby, FuelType::GasoleoA, day("2026-08-27"))
        .unwrap();
    ledger
        .record_daily_mean(&nearby, FuelType::Gasolina95E5, day("2026-08-27"))
        .unwrap();

    let entries = ledger.load().unwrap();
    assert_eq!(entries.len(), 3);
    assert!(HistoryLedger::contains(
        &entries,
        day("2026-08-26"),
        FuelType::GasoleoA
    ));
    assert!(HistoryLedger::contains(
        &entries,
        day("2026-08-27"),
        FuelType::Gasolina95E5
    ));
    assert!(!HistoryLedger::contains(
        &entries,
        day("2026-08-26"),
        FuelType::Gasolina95E5Premium
    ));
}
