use rand::Rng;

use crate::models::{Coordinate, Stop};
use crate::utils::service_area::ServiceArea;

/// Morning route through Krosno Odrzańskie used by the demo binary
pub fn sample_route() -> Vec<Stop> {
    vec![
        Stop::new("PKG-101", Coordinate::new(52.052, 15.105))
            .with_address("ul. Poznańska 12")
            .with_priority(true)
            .with_time_window("10:00 - 11:00"),
        Stop::new("PKG-102", Coordinate::new(52.048, 15.112))
            .with_address("ul. Piastów 5")
            .with_time_window("11:00 - 11:15"),
        Stop::new("PKG-103", Coordinate::new(52.051, 15.095))
            .with_address("ul. Bohaterów WP 22")
            .with_priority(true)
            .with_time_window("09:30 - 10:00"),
        Stop::new("PKG-104", Coordinate::new(52.040, 15.085)).with_address("ul. Słoneczna 8"),
        Stop::new("PKG-105", Coordinate::new(52.058, 15.090)).with_address("ul. 1 Maja 45"),
    ]
}

/// Random pending route inside `area`.
///
/// Roughly one stop in `unlocated_every` has no coordinate and one in
/// `priority_every` is flagged priority; pass 0 to disable either.
pub fn random_route<R: Rng>(
    area: &ServiceArea,
    count: usize,
    unlocated_every: usize,
    priority_every: usize,
    rng: &mut R,
) -> Vec<Stop> {
    (0..count)
        .map(|i| {
            let id = format!("RND-{:03}", i + 1);
            let unlocated = unlocated_every > 0 && rng.gen_range(0..unlocated_every) == 0;
            let stop = if unlocated {
                Stop::unlocated(id)
            } else {
                Stop::new(id, area.random_coordinate(rng))
            };
            let priority = priority_every > 0 && rng.gen_range(0..priority_every) == 0;
            stop.with_priority(priority)
        })
        .collect()
}
