// Stop model representing a single delivery target on the route

use crate::models::{Coordinate, StopId};
use serde::{Deserialize, Serialize};

/// Location confidence levels produced by label ingestion
pub mod confidence {
    /// Locker code or historical GPS fix
    pub const VERIFIED: f64 = 1.0;
    /// Street address text without a geocoded position
    pub const ADDRESS_ONLY: f64 = 0.5;
    /// Raw, unrecognised label text
    pub const UNVERIFIED: f64 = 0.0;
}

/// Delivery status of a stop. Only `Pending` stops are timed or reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopStatus {
    Pending,
    Delivered,
    Failed,
    Skipped,
}

impl StopStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, StopStatus::Pending)
    }
}

impl std::fmt::Display for StopStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StopStatus::Pending => "PENDING",
            StopStatus::Delivered => "DELIVERED",
            StopStatus::Failed => "FAILED",
            StopStatus::Skipped => "SKIPPED",
        };
        f.pad(s)
    }
}

/// Represents a delivery stop. The position of a stop in its list is its route order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Unique identifier for the stop
    pub id: StopId,

    /// Geographic location, `None` when the position is unknown
    #[serde(default, rename = "coords")]
    pub location: Option<Coordinate>,

    /// Display-only confidence in [0, 1]
    #[serde(default)]
    pub location_confidence: f64,

    /// Normalised street address, if the label carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Raw shipment reference for labels that could not be resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment_id: Option<String>,

    /// Pinned earlier by upstream sorting
    #[serde(default)]
    pub priority: bool,

    pub status: StopStatus,

    /// Excluded from automatic reordering
    #[serde(default, rename = "isLocked")]
    pub locked: bool,

    /// Delivery window promised to the recipient, e.g. "10:00 - 11:00"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time_window: Option<String>,

    /// Predicted arrival ("HH:MM"), only meaningful for pending stops
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_eta: Option<String>,
}

impl Stop {
    /// Creates a new pending, unlocked stop at a known location
    pub fn new<S: Into<String>>(id: S, location: Coordinate) -> Self {
        Self {
            location: Some(location),
            location_confidence: confidence::VERIFIED,
            ..Self::unlocated(id)
        }
    }

    /// Creates a new pending, unlocked stop whose position is unknown
    pub fn unlocated<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            location: None,
            location_confidence: confidence::UNVERIFIED,
            address: None,
            shipment_id: None,
            priority: false,
            status: StopStatus::Pending,
            locked: false,
            estimated_time_window: None,
            calculated_eta: None,
        }
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_status(mut self, status: StopStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_address<S: Into<String>>(mut self, address: S) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_time_window<S: Into<String>>(mut self, window: S) -> Self {
        self.estimated_time_window = Some(window.into());
        self
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }
}
