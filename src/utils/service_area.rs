// Service area bounds backed by a geo rectangle

use crate::error::{CopilotError, Result};
use crate::models::{Coordinate, Stop};
use geo::{coord, BoundingRect, Intersects, MultiPoint, Point, Rect};
use rand::Rng;

/// Rectangular delivery area in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceArea {
    rect: Rect<f64>,
}

impl ServiceArea {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Result<Self> {
        let finite = [min_lat, max_lat, min_lng, max_lng]
            .iter()
            .all(|v| v.is_finite());
        if !finite || min_lat > max_lat || min_lng > max_lng {
            return Err(CopilotError::InvalidConfig(format!(
                "invalid service area bounds lat {}..{} lng {}..{}",
                min_lat, max_lat, min_lng, max_lng
            )));
        }
        Ok(Self {
            rect: Rect::new(
                coord! { x: min_lng, y: min_lat },
                coord! { x: max_lng, y: max_lat },
            ),
        })
    }

    /// Smallest area spanning every located stop, `None` if no stop has a location
    pub fn bounding(stops: &[Stop]) -> Option<Self> {
        let points: Vec<Point<f64>> = stops
            .iter()
            .filter_map(|s| s.location)
            .map(Point::from)
            .collect();
        MultiPoint::new(points)
            .bounding_rect()
            .map(|rect| Self { rect })
    }

    /// Boundary inclusive
    pub fn contains(&self, c: &Coordinate) -> bool {
        self.rect.intersects(&coord! { x: c.lng, y: c.lat })
    }

    pub fn south_west(&self) -> Coordinate {
        let min = self.rect.min();
        Coordinate::new(min.y, min.x)
    }

    pub fn north_east(&self) -> Coordinate {
        let max = self.rect.max();
        Coordinate::new(max.y, max.x)
    }

    pub fn center(&self) -> Coordinate {
        let center = self.rect.center();
        Coordinate::new(center.y, center.x)
    }

    /// Uniformly random coordinate inside the area
    pub fn random_coordinate<R: Rng>(&self, rng: &mut R) -> Coordinate {
        let (sw, ne) = (self.south_west(), self.north_east());
        let lat = sw.lat + rng.gen::<f64>() * (ne.lat - sw.lat);
        let lng = sw.lng + rng.gen::<f64>() * (ne.lng - sw.lng);
        Coordinate::new(lat, lng)
    }
}
