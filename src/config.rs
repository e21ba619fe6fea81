//! Engine configuration, loaded from TOML.

use crate::error::{CopilotError, Result};
use crate::models::{Coordinate, Minutes};
use crate::utils::service_area::ServiceArea;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest accepted optimizer window; 6! = 720 permutations
pub const MAX_WINDOW_SIZE: usize = 6;

/// Slowest average speed accepted for the estimator (walking pace)
pub const MIN_AVERAGE_SPEED_KMH: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopilotConfig {
    /// Start location used when no predecessor stop supplies one
    pub depot: Coordinate,
    /// Number of upcoming pending stops the copilot may reorder
    pub window_size: usize,
    /// Pending stops required before the copilot looks at a route
    pub min_pending_stops: usize,
    /// Smallest saving worth bothering the courier with
    pub min_savings_minutes: Minutes,
    /// Time spent handing over a parcel
    pub service_minutes: Minutes,
    pub estimator: EstimatorConfig,
    pub service_area: Option<BoundsConfig>,
    pub city_memory: Option<CityMemoryConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub average_speed_kmh: f64,
    /// Added to every leg for parking and traffic lights
    pub overhead_minutes: Minutes,
    /// Cost of a leg with an unknown endpoint
    pub fallback_minutes: Minutes,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsConfig {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMemoryConfig {
    pub path: PathBuf,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: u8,
}

fn default_min_confidence() -> u8 {
    10
}

impl Default for CopilotConfig {
    fn default() -> Self {
        Self {
            depot: Coordinate::new(52.035, 15.130),
            window_size: 4,
            min_pending_stops: 3,
            min_savings_minutes: 3,
            service_minutes: 3,
            estimator: EstimatorConfig::default(),
            service_area: Some(BoundsConfig::default()),
            city_memory: None,
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 25.0,
            overhead_minutes: 2,
            fallback_minutes: 5,
        }
    }
}

impl Default for BoundsConfig {
    // Krosno Odrzańskie city limits
    fn default() -> Self {
        Self {
            min_lat: 52.030,
            max_lat: 52.065,
            min_lng: 15.070,
            max_lng: 15.140,
        }
    }
}

impl CopilotConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: CopilotConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading copilot configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 || self.window_size > MAX_WINDOW_SIZE {
            return Err(CopilotError::InvalidConfig(format!(
                "window_size must be between 1 and {}, found {}",
                MAX_WINDOW_SIZE, self.window_size
            )));
        }
        if self.min_pending_stops == 0 {
            return Err(CopilotError::InvalidConfig(
                "min_pending_stops must be at least 1".to_string(),
            ));
        }
        if self.min_savings_minutes == 0 {
            return Err(CopilotError::InvalidConfig(
                "min_savings_minutes must be at least 1".to_string(),
            ));
        }
        let speed = self.estimator.average_speed_kmh;
        if !speed.is_finite() || speed < MIN_AVERAGE_SPEED_KMH {
            return Err(CopilotError::InvalidConfig(format!(
                "average_speed_kmh must be at least {}, found {}",
                MIN_AVERAGE_SPEED_KMH, speed
            )));
        }
        if let Some(area) = self.service_area()? {
            if !area.contains(&self.depot) {
                log::warn!(
                    "depot ({}, {}) lies outside the configured service area",
                    self.depot.lat,
                    self.depot.lng
                );
            }
        }
        Ok(())
    }

    /// The configured service area, if any
    pub fn service_area(&self) -> Result<Option<ServiceArea>> {
        self.service_area
            .as_ref()
            .map(|b| ServiceArea::new(b.min_lat, b.max_lat, b.min_lng, b.max_lng))
            .transpose()
    }
}
