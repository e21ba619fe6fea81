use chrono::NaiveDateTime;
use std::cmp::Ordering;

use crate::algorithms::RouteOptimizer;
use crate::models::Stop;

/// One-off ordering for a freshly loaded route: priority stops first, then a
/// north-to-south scan line. Stops without a location trail their group.
pub fn initial_cluster_sort<O: RouteOptimizer + ?Sized>(
    stops: &[Stop],
    optimizer: &O,
    start: NaiveDateTime,
) -> Vec<Stop> {
    let mut sorted = stops.to_vec();
    sorted.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| match (a.location, b.location) {
                (Some(la), Some(lb)) => lb.lat.total_cmp(&la.lat),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
    optimizer.propagate(&sorted, start)
}
