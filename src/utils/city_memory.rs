// City memory: learned per-segment travel times layered over a fallback estimator

use crate::error::Result;
use crate::models::{Coordinate, Minutes};
use crate::utils::distance::TravelTimeEstimator;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Highest confidence a segment can reach
pub const MAX_CONFIDENCE: u8 = 100;

/// Observed travel time between two locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySegment {
    /// Location key of the segment start
    pub from_id: String,
    /// Location key of the segment end
    pub to_id: String,
    pub duration_minutes: f64,
    /// Number of traversals folded into `duration_minutes`, capped at 100
    pub confidence: u8,
}

/// Estimator that prefers learned segment durations over its fallback
#[derive(Debug, Clone)]
pub struct CityMemoryEstimator<E> {
    segments: HashMap<(String, String), CitySegment>,
    min_confidence: u8,
    fallback: E,
}

impl<E: TravelTimeEstimator> CityMemoryEstimator<E> {
    pub fn new(fallback: E, min_confidence: u8) -> Self {
        Self {
            segments: HashMap::new(),
            min_confidence,
            fallback,
        }
    }

    pub fn with_segments(fallback: E, min_confidence: u8, segments: Vec<CitySegment>) -> Self {
        let mut memory = Self::new(fallback, min_confidence);
        for segment in segments {
            memory
                .segments
                .insert((segment.from_id.clone(), segment.to_id.clone()), segment);
        }
        memory
    }

    /// Loads segments from a JSON array.
    pub fn load<P: AsRef<Path>>(path: P, fallback: E, min_confidence: u8) -> Result<Self> {
        let json_str = fs::read_to_string(path.as_ref())?;
        let segments: Vec<CitySegment> = serde_json::from_str(&json_str)?;
        log::info!(
            "loaded {} city segments from {}",
            segments.len(),
            path.as_ref().display()
        );
        Ok(Self::with_segments(fallback, min_confidence, segments))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut segments: Vec<&CitySegment> = self.segments.values().collect();
        segments.sort_by(|a, b| (&a.from_id, &a.to_id).cmp(&(&b.from_id, &b.to_id)));
        fs::write(path, serde_json::to_string_pretty(&segments)?)?;
        Ok(())
    }

    /// Folds an observed traversal into the running mean for this segment.
    pub fn record(&mut self, from: &Coordinate, to: &Coordinate, observed_minutes: f64) {
        let key = (from.location_key(), to.location_key());
        let segment = self.segments.entry(key.clone()).or_insert(CitySegment {
            from_id: key.0,
            to_id: key.1,
            duration_minutes: 0.0,
            confidence: 0,
        });

        let n = segment.confidence as f64;
        segment.duration_minutes = (segment.duration_minutes * n + observed_minutes) / (n + 1.0);
        segment.confidence = segment.confidence.saturating_add(1).min(MAX_CONFIDENCE);
    }

    pub fn segment(&self, from: &Coordinate, to: &Coordinate) -> Option<&CitySegment> {
        self.segments
            .get(&(from.location_key(), to.location_key()))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<E: TravelTimeEstimator> TravelTimeEstimator for CityMemoryEstimator<E> {
    fn travel_minutes(&self, from: Option<&Coordinate>, to: Option<&Coordinate>) -> Minutes {
        if let (Some(a), Some(b)) = (from, to) {
            if let Some(segment) = self.segment(a, b) {
                if segment.confidence >= self.min_confidence {
                    return segment.duration_minutes.ceil() as Minutes;
                }
            }
        }
        self.fallback.travel_minutes(from, to)
    }
}
