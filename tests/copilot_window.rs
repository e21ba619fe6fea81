mod common;

use common::{ids, shift_start, stop_at, west, zig_zag};
use courier_copilot::{Copilot, CopilotConfig, DeclineReason, RouteOptimizer, Stop, StopStatus};

#[test]
fn test_zig_zag_window_is_straightened() {
    let copilot = common::copilot();
    let suggestion = copilot
        .find_optimization(&zig_zag(), shift_start())
        .expect("zig-zag should be improved");

    assert_eq!(suggestion.savings_minutes, 30);
    assert_eq!(
        ids(&suggestion.proposed_stops),
        vec!["NEAR-1", "NEAR-2", "FAR-1", "FAR-2"]
    );
    assert!(suggestion
        .proposed_stops
        .iter()
        .all(|s| s.calculated_eta.is_some()));
}

#[test]
fn test_resolved_stops_keep_their_positions() {
    let mut route = zig_zag();
    route.insert(
        1,
        stop_at("DONE", west(6.0)).with_status(StopStatus::Delivered),
    );
    route.push(stop_at("LATER", west(2.0)));

    let suggestion = common::copilot()
        .find_optimization(&route, shift_start())
        .unwrap();

    assert_eq!(
        ids(&suggestion.proposed_stops),
        vec!["NEAR-1", "DONE", "NEAR-2", "FAR-1", "FAR-2", "LATER"]
    );
    assert_eq!(suggestion.proposed_stops[1].calculated_eta, None);
    assert_eq!(
        suggestion.affected_stop_ids,
        vec!["FAR-1", "NEAR-1", "FAR-2", "NEAR-2"]
    );
}

#[test]
fn test_locked_stop_in_window_blocks_suggestion() {
    for locked_index in 0..4 {
        let mut route = zig_zag();
        route[locked_index].locked = true;

        let copilot = common::copilot();
        assert_eq!(
            copilot.evaluate(&route, shift_start()).unwrap_err(),
            DeclineReason::LockedStopInWindow
        );
        assert!(copilot.find_optimization(&route, shift_start()).is_none());
    }
}

#[test]
fn test_locked_stop_past_window_is_ignored() {
    let mut route = zig_zag();
    route.push(stop_at("TAIL", west(3.0)).with_locked(true));

    assert!(common::copilot()
        .find_optimization(&route, shift_start())
        .is_some());
}

#[test]
fn test_locked_resolved_stop_is_ignored() {
    let mut route = zig_zag();
    route.insert(
        0,
        stop_at("DONE", common::DEPOT)
            .with_status(StopStatus::Delivered)
            .with_locked(true),
    );

    assert!(common::copilot()
        .find_optimization(&route, shift_start())
        .is_some());
}

#[test]
fn test_unlocated_stop_in_window_blocks_suggestion() {
    let mut route = zig_zag();
    route[2] = Stop::unlocated("RAW-1");

    assert_eq!(
        common::copilot()
            .evaluate(&route, shift_start())
            .unwrap_err(),
        DeclineReason::UnknownLocationInWindow
    );
}

#[test]
fn test_unlocated_stop_past_window_is_ignored() {
    let mut route = zig_zag();
    route.push(Stop::unlocated("RAW-1"));

    let suggestion = common::copilot()
        .find_optimization(&route, shift_start())
        .unwrap();
    assert_eq!(suggestion.proposed_stops[4].id, "RAW-1");
}

#[test]
fn test_too_few_pending_stops() {
    let route = vec![stop_at("FAR-1", west(5.0)), stop_at("NEAR-1", west(0.5))];

    assert_eq!(
        common::copilot()
            .evaluate(&route, shift_start())
            .unwrap_err(),
        DeclineReason::TooFewPendingStops {
            pending: 2,
            required: 3
        }
    );
}

#[test]
fn test_savings_threshold_is_inclusive() {
    let mut config = CopilotConfig::default();
    config.min_savings_minutes = 30;
    assert!(Copilot::from_config(&config)
        .find_optimization(&zig_zag(), shift_start())
        .is_some());

    config.min_savings_minutes = 31;
    assert_eq!(
        Copilot::from_config(&config)
            .evaluate(&zig_zag(), shift_start())
            .unwrap_err(),
        DeclineReason::BelowSavingsThreshold {
            savings: 30,
            threshold: 31
        }
    );
}

#[test]
fn test_smaller_window_only_reorders_its_slots() {
    let mut config = CopilotConfig::default();
    config.window_size = 3;
    let suggestion = Copilot::from_config(&config)
        .find_optimization(&zig_zag(), shift_start())
        .unwrap();

    assert_eq!(suggestion.affected_stop_ids.len(), 3);
    assert_eq!(suggestion.proposed_stops[3].id, "NEAR-2");
}

#[test]
fn test_equal_cost_orders_resolve_to_first_enumerated() {
    // NEAR-1 and NEAR-2 share a doorstep, so both near-first orders cost the same
    let mut route = zig_zag();
    route[3].location = Some(west(0.5));

    let copilot = common::copilot();
    let first = copilot.find_optimization(&route, shift_start()).unwrap();
    assert_eq!(
        ids(&first.proposed_stops),
        vec!["NEAR-1", "NEAR-2", "FAR-1", "FAR-2"]
    );

    for _ in 0..5 {
        let again = copilot.find_optimization(&route, shift_start()).unwrap();
        assert_eq!(again.proposed_stops, first.proposed_stops);
        assert_eq!(again.savings_minutes, first.savings_minutes);
    }
}
