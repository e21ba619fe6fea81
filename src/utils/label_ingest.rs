// Label ingestion: turns scanned or typed label text into a pending stop

use crate::error::Result;
use crate::models::{confidence, Coordinate, Stop};
use regex::Regex;
use std::collections::HashMap;
use uuid::Uuid;

/// Parcel lockers known to the courier app
pub fn default_lockers() -> HashMap<String, Coordinate> {
    HashMap::from([
        ("KRO01A".to_string(), Coordinate::new(52.055, 15.110)),
        ("KRO05M".to_string(), Coordinate::new(52.035, 15.080)),
        ("KRO99P".to_string(), Coordinate::new(52.060, 15.130)),
    ])
}

/// Resolves locker codes and street addresses found on shipping labels
#[derive(Debug, Clone)]
pub struct LockerLabelIngestor {
    lockers: HashMap<String, Coordinate>,
    locker_pattern: Regex,
    postal_code_pattern: Regex,
    street_pattern: Regex,
    lock_on_create: bool,
}

impl LockerLabelIngestor {
    pub fn new(lockers: HashMap<String, Coordinate>) -> Result<Self> {
        Ok(Self {
            lockers,
            locker_pattern: Regex::new(r"PACZKOMAT_([A-Z0-9]+)")?,
            postal_code_pattern: Regex::new(r"\d{2}-\d{3}")?,
            street_pattern: Regex::new(r"(?i)(ul\.|ulica|al\.|aleja|pl\.|plac)")?,
            lock_on_create: false,
        })
    }

    /// Whether freshly ingested stops start out locked against reordering
    pub fn with_lock_on_create(mut self, lock: bool) -> Self {
        self.lock_on_create = lock;
        self
    }

    pub fn ingest(&self, payload: &str) -> Stop {
        let mut stop = Stop::unlocated(Uuid::new_v4().to_string()).with_locked(self.lock_on_create);

        if let Some(location) = self.locker_location(payload) {
            stop.location = Some(location);
            stop.location_confidence = confidence::VERIFIED;
            log::debug!("label resolved to locker at ({}, {})", location.lat, location.lng);
        } else if self.looks_like_address(payload) {
            stop.address = Some(normalize_address(payload));
            stop.location_confidence = confidence::ADDRESS_ONLY;
        } else {
            stop.shipment_id = Some(payload.trim().to_string());
            stop.location_confidence = confidence::UNVERIFIED;
            log::debug!("label not recognised, kept as raw shipment id");
        }
        stop
    }

    fn locker_location(&self, payload: &str) -> Option<Coordinate> {
        let captures = self.locker_pattern.captures(payload)?;
        let code = captures.get(1)?.as_str();
        self.lockers.get(code).copied()
    }

    fn looks_like_address(&self, payload: &str) -> bool {
        self.postal_code_pattern.is_match(payload) && self.street_pattern.is_match(payload)
    }
}

fn normalize_address(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
