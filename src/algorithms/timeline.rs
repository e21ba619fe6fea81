use chrono::{NaiveDateTime, TimeDelta};

use crate::config::CopilotConfig;
use crate::models::{Coordinate, Minutes, Stop};
use crate::utils::distance::{HaversineEstimator, TravelTimeEstimator};

/// Format of `Stop::calculated_eta`
pub const ETA_FORMAT: &str = "%H:%M";

/// Stamps predicted arrival times onto an ordered stop list
#[derive(Debug, Clone)]
pub struct Timeline<E = HaversineEstimator> {
    estimator: E,
    depot: Coordinate,
    service_minutes: Minutes,
}

impl Timeline<HaversineEstimator> {
    pub fn from_config(config: &CopilotConfig) -> Self {
        Self::new(
            HaversineEstimator::new(&config.estimator),
            config.depot,
            config.service_minutes,
        )
    }
}

impl<E: TravelTimeEstimator> Timeline<E> {
    pub fn new(estimator: E, depot: Coordinate, service_minutes: Minutes) -> Self {
        Self {
            estimator,
            depot,
            service_minutes,
        }
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn depot(&self) -> Coordinate {
        self.depot
    }

    /// Returns a copy of `stops` with ETAs set on pending stops and cleared everywhere else.
    ///
    /// Resolved stops do not move the clock or the courier. A pending stop
    /// without a coordinate is timed with the fallback leg cost but leaves the
    /// current location at the last known position.
    pub fn propagate(&self, stops: &[Stop], start: NaiveDateTime) -> Vec<Stop> {
        let mut clock = start;
        let mut current = self.depot;

        stops
            .iter()
            .map(|stop| {
                let mut timed = stop.clone();
                if !stop.is_pending() {
                    timed.calculated_eta = None;
                    return timed;
                }

                let travel = self
                    .estimator
                    .travel_minutes(Some(&current), stop.location.as_ref());
                clock = advance(clock, travel);
                timed.calculated_eta = Some(clock.format(ETA_FORMAT).to_string());
                clock = advance(clock, self.service_minutes);

                if let Some(location) = stop.location {
                    current = location;
                }
                timed
            })
            .collect()
    }

    /// Sum of leg durations visiting `stops` in order from `start`
    pub fn travel_cost<'a, I>(&self, start: Coordinate, stops: I) -> Minutes
    where
        I: IntoIterator<Item = &'a Stop>,
    {
        let mut current = start;
        let mut cost: Minutes = 0;
        for stop in stops {
            cost = cost.saturating_add(
                self.estimator
                    .travel_minutes(Some(&current), stop.location.as_ref()),
            );
            if let Some(location) = stop.location {
                current = location;
            }
        }
        cost
    }
}

/// Moves the clock forward, pinning it at the end of the calendar instead of overflowing
fn advance(clock: NaiveDateTime, minutes: Minutes) -> NaiveDateTime {
    clock
        .checked_add_signed(TimeDelta::minutes(i64::from(minutes)))
        .unwrap_or(NaiveDateTime::MAX)
}
