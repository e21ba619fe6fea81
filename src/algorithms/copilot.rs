use chrono::NaiveDateTime;
use itertools::Itertools;
use std::fmt;
use uuid::Uuid;

use crate::algorithms::timeline::Timeline;
use crate::algorithms::RouteOptimizer;
use crate::config::CopilotConfig;
use crate::models::{Minutes, RouteFingerprint, Stop, Suggestion, SuggestionKind};
use crate::utils::distance::{HaversineEstimator, TravelTimeEstimator};

/// Why the copilot left a route alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclineReason {
    NoPendingStops,
    TooFewPendingStops { pending: usize, required: usize },
    LockedStopInWindow,
    UnknownLocationInWindow,
    /// No permutation beats the current order
    AlreadyOptimal,
    BelowSavingsThreshold { savings: Minutes, threshold: Minutes },
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclineReason::NoPendingStops => write!(f, "no pending stops"),
            DeclineReason::TooFewPendingStops { pending, required } => {
                write!(f, "{} pending stops, at least {} required", pending, required)
            }
            DeclineReason::LockedStopInWindow => write!(f, "window contains a locked stop"),
            DeclineReason::UnknownLocationInWindow => {
                write!(f, "window contains a stop without a location")
            }
            DeclineReason::AlreadyOptimal => write!(f, "current order is already the cheapest"),
            DeclineReason::BelowSavingsThreshold { savings, threshold } => {
                write!(f, "best saving {} min is below {} min", savings, threshold)
            }
        }
    }
}

/// Sliding-window local search over the next few pending stops.
///
/// Every permutation of the window is costed; the first cheapest one in
/// enumeration order wins. Locked stops and stops without a location make
/// the whole window ineligible.
#[derive(Debug, Clone)]
pub struct Copilot<E = HaversineEstimator> {
    timeline: Timeline<E>,
    window_size: usize,
    min_pending_stops: usize,
    min_savings_minutes: Minutes,
}

impl Copilot<HaversineEstimator> {
    pub fn from_config(config: &CopilotConfig) -> Self {
        Self::new(Timeline::from_config(config), config)
    }
}

impl<E: TravelTimeEstimator> Copilot<E> {
    /// Copilot using `estimator` for every leg instead of the configured haversine one
    pub fn with_estimator(estimator: E, config: &CopilotConfig) -> Self {
        let timeline = Timeline::new(estimator, config.depot, config.service_minutes);
        Self::new(timeline, config)
    }

    /// Builds a copilot around an existing timeline, taking the window rules from `config`
    pub fn new(timeline: Timeline<E>, config: &CopilotConfig) -> Self {
        Self {
            timeline,
            window_size: config.window_size,
            min_pending_stops: config.min_pending_stops,
            min_savings_minutes: config.min_savings_minutes,
        }
    }

    pub fn timeline(&self) -> &Timeline<E> {
        &self.timeline
    }

    pub fn evaluate(
        &self,
        stops: &[Stop],
        start: NaiveDateTime,
    ) -> Result<Suggestion, DeclineReason> {
        let pending: Vec<usize> = stops
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_pending())
            .map(|(i, _)| i)
            .collect();

        let first_pending = *pending.first().ok_or(DeclineReason::NoPendingStops)?;
        if pending.len() < self.min_pending_stops {
            return Err(DeclineReason::TooFewPendingStops {
                pending: pending.len(),
                required: self.min_pending_stops,
            });
        }

        let slots = &pending[..self.window_size.min(pending.len())];
        let window: Vec<&Stop> = slots.iter().map(|&i| &stops[i]).collect();
        if window.iter().any(|s| s.locked) {
            return Err(DeclineReason::LockedStopInWindow);
        }
        if window.iter().any(|s| !s.has_location()) {
            return Err(DeclineReason::UnknownLocationInWindow);
        }

        let origin = first_pending
            .checked_sub(1)
            .and_then(|i| stops[i].location)
            .unwrap_or_else(|| self.timeline.depot());

        let current_cost = self.timeline.travel_cost(origin, window.iter().copied());
        let mut best_order: Vec<usize> = (0..window.len()).collect();
        let mut best_cost = current_cost;
        for order in (0..window.len()).permutations(window.len()) {
            let cost = self
                .timeline
                .travel_cost(origin, order.iter().map(|&i| window[i]));
            if cost < best_cost {
                best_cost = cost;
                best_order = order;
            }
        }

        if best_order.iter().enumerate().all(|(slot, &i)| slot == i) {
            return Err(DeclineReason::AlreadyOptimal);
        }

        let savings = current_cost.saturating_sub(best_cost);
        if savings < self.min_savings_minutes {
            return Err(DeclineReason::BelowSavingsThreshold {
                savings,
                threshold: self.min_savings_minutes,
            });
        }

        let mut proposal = stops.to_vec();
        for (&slot, &i) in slots.iter().zip(&best_order) {
            proposal[slot] = window[i].clone();
        }

        let suggestion = Suggestion {
            id: Uuid::new_v4().to_string(),
            kind: SuggestionKind::Shortcut,
            savings_minutes: savings,
            message: format!("Shortcut found (-{} min)", savings),
            affected_stop_ids: window.iter().map(|s| s.id.clone()).collect(),
            proposed_stops: self.timeline.propagate(&proposal, start),
            basis: RouteFingerprint::of(stops),
        };
        log::info!(
            "copilot found a shortcut over {} stops saving {} min",
            window.len(),
            savings
        );
        Ok(suggestion)
    }
}

impl<E: TravelTimeEstimator> RouteOptimizer for Copilot<E> {
    fn propagate(&self, stops: &[Stop], start: NaiveDateTime) -> Vec<Stop> {
        self.timeline.propagate(stops, start)
    }

    fn find_optimization(&self, stops: &[Stop], start: NaiveDateTime) -> Option<Suggestion> {
        match self.evaluate(stops, start) {
            Ok(suggestion) => Some(suggestion),
            Err(reason) => {
                log::debug!("copilot declined: {}", reason);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, StopStatus};
    use chrono::NaiveDate;

    fn eight_am() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap()
    }

    // Points on the depot's parallel, `km` kilometres west of it
    fn west(km: f64) -> Coordinate {
        Coordinate::new(52.035, 15.130 - km * 0.014611)
    }

    fn zig_zag() -> Vec<Stop> {
        vec![
            Stop::new("FAR-1", west(5.0)),
            Stop::new("NEAR-1", west(0.5)),
            Stop::new("FAR-2", west(5.5)),
            Stop::new("NEAR-2", west(1.0)),
        ]
    }

    fn ids(stops: &[Stop]) -> Vec<&str> {
        stops.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_zig_zag_is_untangled() {
        let copilot = Copilot::from_config(&CopilotConfig::default());
        let suggestion = copilot.evaluate(&zig_zag(), eight_am()).unwrap();

        assert_eq!(
            ids(&suggestion.proposed_stops),
            vec!["NEAR-1", "NEAR-2", "FAR-1", "FAR-2"]
        );
        assert_eq!(suggestion.savings_minutes, 30);
        assert_eq!(suggestion.affected_stop_ids, vec!["FAR-1", "NEAR-1", "FAR-2", "NEAR-2"]);
        assert!(suggestion
            .proposed_stops
            .iter()
            .all(|s| s.calculated_eta.is_some()));
    }

    #[test]
    fn test_window_starts_after_resolved_predecessor() {
        // Delivered stop at the far end: the best order now runs back towards the depot
        let mut stops = vec![Stop::new("DONE", west(6.0)).with_status(StopStatus::Delivered)];
        stops.extend(
            [0.5, 1.0, 5.0, 5.5]
                .iter()
                .enumerate()
                .map(|(i, km)| Stop::new(format!("S{}", i + 1), west(*km))),
        );

        let copilot = Copilot::from_config(&CopilotConfig::default());
        let suggestion = copilot.evaluate(&stops, eight_am()).unwrap();

        assert_eq!(suggestion.savings_minutes, 12);
        assert_eq!(
            ids(&suggestion.proposed_stops),
            vec!["DONE", "S4", "S3", "S2", "S1"]
        );
        assert_eq!(suggestion.proposed_stops[0].calculated_eta, None);
    }

    #[test]
    fn test_already_optimal_from_depot_is_declined() {
        let stops: Vec<Stop> = [0.5, 1.0, 5.0, 5.5]
            .iter()
            .enumerate()
            .map(|(i, km)| Stop::new(format!("S{}", i + 1), west(*km)))
            .collect();
        let copilot = Copilot::from_config(&CopilotConfig::default());

        assert_eq!(
            copilot.evaluate(&stops, eight_am()).unwrap_err(),
            DeclineReason::AlreadyOptimal
        );
    }

    #[test]
    fn test_zero_threshold_never_offers_current_order() {
        let mut config = CopilotConfig::default();
        config.min_savings_minutes = 0;
        let copilot = Copilot::from_config(&config);
        let stops = copilot.propagate(&zig_zag()[1..], eight_am());

        // NEAR-1, FAR-2, NEAR-2 reordered once, after that nothing is left to gain
        let first = copilot.evaluate(&stops, eight_am()).unwrap();
        assert!(first.savings_minutes > 0);
        assert_eq!(
            copilot
                .evaluate(&first.proposed_stops, eight_am())
                .unwrap_err(),
            DeclineReason::AlreadyOptimal
        );
    }

    #[test]
    fn test_only_window_slots_are_rewritten() {
        let mut stops = zig_zag();
        stops.insert(2, Stop::new("FAILED", west(3.0)).with_status(StopStatus::Failed));
        stops.push(Stop::new("TAIL", west(2.0)));

        let copilot = Copilot::from_config(&CopilotConfig::default());
        let suggestion = copilot.evaluate(&stops, eight_am()).unwrap();

        assert_eq!(
            ids(&suggestion.proposed_stops),
            vec!["NEAR-1", "NEAR-2", "FAILED", "FAR-1", "FAR-2", "TAIL"]
        );
        assert_eq!(suggestion.proposed_stops.len(), stops.len());
    }

    #[test]
    fn test_tail_lock_outside_window_is_ignored() {
        let mut stops = zig_zag();
        stops.push(Stop::new("TAIL", west(2.0)).with_locked(true));

        let copilot = Copilot::from_config(&CopilotConfig::default());
        assert!(copilot.find_optimization(&stops, eight_am()).is_some());
    }

    #[test]
    fn test_decline_reasons() {
        let copilot = Copilot::from_config(&CopilotConfig::default());

        let delivered: Vec<Stop> = zig_zag()
            .into_iter()
            .map(|s| s.with_status(StopStatus::Delivered))
            .collect();
        assert_eq!(
            copilot.evaluate(&delivered, eight_am()).unwrap_err(),
            DeclineReason::NoPendingStops
        );

        let short = &zig_zag()[..2];
        assert_eq!(
            copilot.evaluate(short, eight_am()).unwrap_err(),
            DeclineReason::TooFewPendingStops {
                pending: 2,
                required: 3
            }
        );

        let mut locked = zig_zag();
        locked[3].locked = true;
        assert_eq!(
            copilot.evaluate(&locked, eight_am()).unwrap_err(),
            DeclineReason::LockedStopInWindow
        );

        let mut unknown = zig_zag();
        unknown[1].location = None;
        assert_eq!(
            copilot.evaluate(&unknown, eight_am()).unwrap_err(),
            DeclineReason::UnknownLocationInWindow
        );
    }

    #[test]
    fn test_basis_matches_input() {
        let stops = zig_zag();
        let copilot = Copilot::from_config(&CopilotConfig::default());
        let suggestion = copilot.find_optimization(&stops, eight_am()).unwrap();

        assert!(suggestion.is_based_on(&stops));
        assert!(!suggestion.is_based_on(&suggestion.proposed_stops));
        assert_eq!(suggestion.message, "Shortcut found (-30 min)");
    }
}
