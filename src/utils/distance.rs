// Distance and travel-time estimation utilities

use crate::config::EstimatorConfig;
use crate::models::{Coordinate, Minutes};

/// Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the great-circle (haversine) distance between two points in kilometers
pub fn haversine_km(from: &Coordinate, to: &Coordinate) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + (d_lng / 2.0).sin().powi(2) * from.lat.to_radians().cos() * to.lat.to_radians().cos();

    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Converts a pair of optional coordinates into a leg duration in whole minutes
pub trait TravelTimeEstimator {
    fn travel_minutes(&self, from: Option<&Coordinate>, to: Option<&Coordinate>) -> Minutes;
}

impl<E: TravelTimeEstimator + ?Sized> TravelTimeEstimator for &E {
    fn travel_minutes(&self, from: Option<&Coordinate>, to: Option<&Coordinate>) -> Minutes {
        (**self).travel_minutes(from, to)
    }
}

/// Straight-line estimator driving at a fixed urban speed
#[derive(Debug, Clone, PartialEq)]
pub struct HaversineEstimator {
    pub average_speed_kmh: f64,
    pub overhead_minutes: Minutes,
    pub fallback_minutes: Minutes,
}

impl HaversineEstimator {
    pub fn new(config: &EstimatorConfig) -> Self {
        Self {
            average_speed_kmh: config.average_speed_kmh,
            overhead_minutes: config.overhead_minutes,
            fallback_minutes: config.fallback_minutes,
        }
    }
}

impl Default for HaversineEstimator {
    fn default() -> Self {
        Self::new(&EstimatorConfig::default())
    }
}

impl TravelTimeEstimator for HaversineEstimator {
    fn travel_minutes(&self, from: Option<&Coordinate>, to: Option<&Coordinate>) -> Minutes {
        match (from, to) {
            (Some(a), Some(b)) => {
                let hours = haversine_km(a, b) / self.average_speed_kmh;
                // `as` saturates, so absurd speeds give Minutes::MAX instead of wrapping
                ((hours * 60.0).ceil() as Minutes).saturating_add(self.overhead_minutes)
            }
            _ => {
                log::debug!("unknown leg endpoint, using {} min fallback", self.fallback_minutes);
                self.fallback_minutes
            }
        }
    }
}
