//! Caller-side owner of the live stop list and the suggestion lifecycle.
//!
//! The session is the single writer of the route. Every mutation bumps the
//! revision and discards an outstanding suggestion; suggestions computed in
//! the background are only accepted against the revision they were computed
//! from.

use chrono::NaiveDateTime;

use crate::algorithms::copilot::Copilot;
use crate::algorithms::RouteOptimizer;
use crate::error::{CopilotError, Result};
use crate::models::{Minutes, Stop, StopStatus, Suggestion};

/// Replaces `stops` with the suggestion's proposal if it was computed from `stops`
pub fn apply_suggestion(stops: &[Stop], suggestion: Suggestion) -> Result<Vec<Stop>> {
    if !suggestion.is_based_on(stops) {
        log::warn!("refusing stale suggestion {}", suggestion.id);
        return Err(CopilotError::StaleSuggestion);
    }
    Ok(suggestion.proposed_stops)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionState {
    None,
    PendingReview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Immutable copy of the route handed to a background optimizer run
#[derive(Debug, Clone)]
pub struct RouteSnapshot {
    pub revision: u64,
    pub stops: Vec<Stop>,
}

#[derive(Debug, Clone)]
pub struct RouteSession<O = Copilot> {
    optimizer: O,
    stops: Vec<Stop>,
    start_time: NaiveDateTime,
    revision: u64,
    suggestion: Option<Suggestion>,
}

impl<O: RouteOptimizer> RouteSession<O> {
    pub fn new(optimizer: O, stops: Vec<Stop>, start_time: NaiveDateTime) -> Self {
        let stops = optimizer.propagate(&stops, start_time);
        Self {
            optimizer,
            stops,
            start_time,
            revision: 0,
            suggestion: None,
        }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        self.suggestion.as_ref()
    }

    pub fn state(&self) -> SuggestionState {
        match self.suggestion {
            Some(_) => SuggestionState::PendingReview,
            None => SuggestionState::None,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.stops.iter().filter(|s| s.is_pending()).count()
    }

    /// Re-times the route from a new start instant. Order and statuses are
    /// untouched, so an outstanding suggestion stays valid.
    pub fn set_start_time(&mut self, start_time: NaiveDateTime) {
        self.start_time = start_time;
        self.stops = self.optimizer.propagate(&self.stops, start_time);
    }

    pub fn snapshot(&self) -> RouteSnapshot {
        RouteSnapshot {
            revision: self.revision,
            stops: self.stops.clone(),
        }
    }

    /// Runs the optimizer against the current list and keeps its result for review
    pub fn run_copilot(&mut self) -> Option<&Suggestion> {
        let found = self.optimizer.find_optimization(&self.stops, self.start_time);
        match found {
            Some(suggestion) => {
                let revision = self.revision;
                self.offer(revision, suggestion);
                self.suggestion.as_ref()
            }
            None => None,
        }
    }

    /// Accepts a suggestion computed from the snapshot taken at `revision`.
    /// Returns false, dropping it, when the route changed since then.
    pub fn offer(&mut self, revision: u64, suggestion: Suggestion) -> bool {
        if revision != self.revision || !suggestion.is_based_on(&self.stops) {
            log::info!(
                "discarding suggestion {} computed at revision {} (now {})",
                suggestion.id,
                revision,
                self.revision
            );
            return false;
        }
        log::info!("suggestion {} awaiting review: {}", suggestion.id, suggestion.message);
        self.suggestion = Some(suggestion);
        true
    }

    /// Replaces the route with the outstanding proposal, returning the saving
    pub fn apply_suggestion(&mut self) -> Result<Minutes> {
        let suggestion = self
            .suggestion
            .take()
            .ok_or(CopilotError::NoPendingSuggestion)?;
        let savings = suggestion.savings_minutes;
        let id = suggestion.id.clone();
        let proposed = apply_suggestion(&self.stops, suggestion)?;
        self.stops = self.optimizer.propagate(&proposed, self.start_time);
        self.revision += 1;
        log::info!("applied suggestion {}, saving {} min", id, savings);
        Ok(savings)
    }

    pub fn dismiss_suggestion(&mut self) {
        if let Some(suggestion) = self.suggestion.take() {
            log::info!("suggestion {} dismissed", suggestion.id);
        }
    }

    /// Marks the route as changed and drops any outstanding suggestion
    pub fn invalidate(&mut self) {
        self.revision += 1;
        if let Some(suggestion) = self.suggestion.take() {
            log::info!("suggestion {} invalidated by a route change", suggestion.id);
        }
    }

    pub fn set_status(&mut self, id: &str, status: StopStatus) -> Result<()> {
        let stop = self
            .stops
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CopilotError::StopNotFound(id.to_string()))?;
        stop.status = status;
        self.retime_and_invalidate();
        Ok(())
    }

    /// Manual move: swaps the stop with its neighbour and locks both
    pub fn move_stop(&mut self, index: usize, direction: MoveDirection) -> Result<()> {
        let len = self.stops.len();
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1),
        }
        .filter(|&t| index < len && t < len)
        .ok_or(CopilotError::MoveOutOfBounds { index, len })?;

        self.stops.swap(index, target);
        self.stops[index].locked = true;
        self.stops[target].locked = true;
        self.retime_and_invalidate();
        Ok(())
    }

    /// Priority stops go in front of the first pending stop; others after the last one
    pub fn add_stop(&mut self, stop: Stop) {
        let first_pending = self.stops.iter().position(|s| s.is_pending());
        let last_pending = self.stops.iter().rposition(|s| s.is_pending());
        let index = match (first_pending, last_pending) {
            (Some(first), _) if stop.priority => first,
            (_, Some(last)) => last + 1,
            _ => self.stops.len(),
        };
        self.stops.insert(index, stop);
        self.retime_and_invalidate();
    }

    pub fn replace_stops(&mut self, stops: Vec<Stop>) {
        self.stops = stops;
        self.retime_and_invalidate();
    }

    fn retime_and_invalidate(&mut self) {
        self.stops = self.optimizer.propagate(&self.stops, self.start_time);
        self.invalidate();
    }
}
