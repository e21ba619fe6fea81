pub mod cluster_sort;
pub mod copilot;
pub mod timeline;

// Common algorithm traits
use chrono::NaiveDateTime;

use crate::models::{Stop, Suggestion};

/// Engine seam used by the route session
pub trait RouteOptimizer {
    /// Stamp ETAs onto `stops` without reordering them
    fn propagate(&self, stops: &[Stop], start: NaiveDateTime) -> Vec<Stop>;

    /// Propose a cheaper ordering of the upcoming stops, if one is worth suggesting
    fn find_optimization(&self, stops: &[Stop], start: NaiveDateTime) -> Option<Suggestion>;
}

impl<O: RouteOptimizer + ?Sized> RouteOptimizer for Box<O> {
    fn propagate(&self, stops: &[Stop], start: NaiveDateTime) -> Vec<Stop> {
        (**self).propagate(stops, start)
    }

    fn find_optimization(&self, stops: &[Stop], start: NaiveDateTime) -> Option<Suggestion> {
        (**self).find_optimization(stops, start)
    }
}
