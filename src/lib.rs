// Public modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod utils;

// Re-exports for convenience
pub use algorithms::copilot::{Copilot, DeclineReason};
pub use algorithms::timeline::Timeline;
pub use algorithms::RouteOptimizer;
pub use config::CopilotConfig;
pub use error::{CopilotError, Result};
pub use models::{Coordinate, Stop, StopStatus, Suggestion};
pub use session::{apply_suggestion, RouteSession};
