// Models module - exports all model types

mod coordinate;
mod stop;
mod suggestion;

// Re-export model types
pub use self::coordinate::Coordinate;
pub use self::stop::{confidence, Stop, StopStatus};
pub use self::suggestion::{RouteFingerprint, Suggestion, SuggestionKind};

// Common type aliases for improved code readability
pub type StopId = String;
pub type Minutes = u32;
