// Suggestion models for representing proposed route changes

use crate::models::{Minutes, Stop, StopId};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Kind of change a suggestion proposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionKind {
    /// Local reordering of the upcoming stops
    Shortcut,
    /// Reserved for priority repairs; the copilot does not produce it yet
    PriorityFix,
}

/// Identity of a stop list as seen by the optimizer.
///
/// Covers everything that influences ordering decisions (identifiers,
/// statuses, lock and priority flags, coordinates). ETAs are excluded, so
/// re-timing a list does not change its fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteFingerprint(pub u64);

impl RouteFingerprint {
    pub fn of(stops: &[Stop]) -> Self {
        let mut hasher = DefaultHasher::new();
        stops.len().hash(&mut hasher);
        for stop in stops {
            stop.id.hash(&mut hasher);
            stop.status.hash(&mut hasher);
            stop.locked.hash(&mut hasher);
            stop.priority.hash(&mut hasher);
            match stop.location {
                Some(c) => {
                    1u8.hash(&mut hasher);
                    c.lat.to_bits().hash(&mut hasher);
                    c.lng.to_bits().hash(&mut hasher);
                }
                None => 0u8.hash(&mut hasher),
            }
        }
        RouteFingerprint(hasher.finish())
    }
}

/// A single-use proposal to replace the current stop list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Unique suggestion identifier
    pub id: String,

    pub kind: SuggestionKind,

    /// Estimated time saved by the proposal
    pub savings_minutes: Minutes,

    /// Human readable summary
    pub message: String,

    /// Identifiers of the window stops in their original order
    pub affected_stop_ids: Vec<StopId>,

    /// Complete replacement list, already timeline-propagated
    pub proposed_stops: Vec<Stop>,

    /// Fingerprint of the list this proposal was computed from
    pub basis: RouteFingerprint,
}

impl Suggestion {
    /// Whether this suggestion was computed against `stops`
    pub fn is_based_on(&self, stops: &[Stop]) -> bool {
        self.basis == RouteFingerprint::of(stops)
    }
}
