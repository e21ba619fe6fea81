// Coordinate model representing a point in decimal degrees

use serde::{Deserialize, Serialize};

/// Represents a latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Creates a new coordinate with the given latitude and longitude
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Stable key used to match a coordinate against learned segments.
    /// Rounded to 4 decimals (roughly 10 m), so GPS jitter maps to the same key.
    pub fn location_key(&self) -> String {
        format!("{:.4},{:.4}", self.lat, self.lng)
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        // geo works in (x, y) = (lng, lat)
        geo::Point::new(c.lng, c.lat)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(p: geo::Point<f64>) -> Self {
        Coordinate::new(p.y(), p.x())
    }
}
