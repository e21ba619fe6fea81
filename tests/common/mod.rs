#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use courier_copilot::{Coordinate, Copilot, CopilotConfig, Stop};

pub const DEPOT: Coordinate = Coordinate {
    lat: 52.035,
    lng: 15.130,
};

pub fn shift_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 6)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap()
}

pub fn copilot() -> Copilot {
    Copilot::from_config(&CopilotConfig::default())
}

/// Point on the depot's parallel, `km` kilometres west of it
pub fn west(km: f64) -> Coordinate {
    Coordinate::new(DEPOT.lat, DEPOT.lng - km * 0.014611)
}

pub fn stop_at(id: &str, location: Coordinate) -> Stop {
    Stop::new(id, location)
}

pub fn ids(stops: &[Stop]) -> Vec<&str> {
    stops.iter().map(|s| s.id.as_str()).collect()
}

/// Far-near-far-near along one axis, depot next to the near points
pub fn zig_zag() -> Vec<Stop> {
    vec![
        stop_at("FAR-1", west(5.0)),
        stop_at("NEAR-1", west(0.5)),
        stop_at("FAR-2", west(5.5)),
        stop_at("NEAR-2", west(1.0)),
    ]
}
