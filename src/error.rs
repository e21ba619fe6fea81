use crate::models::StopId;

#[derive(thiserror::Error, Debug)]
pub enum CopilotError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to (de)serialize route data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid label pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("no stop with id {0} on the route")]
    StopNotFound(StopId),
    #[error("cannot move stop at index {index}: route has {len} stops")]
    MoveOutOfBounds { index: usize, len: usize },
    #[error("there is no suggestion awaiting review")]
    NoPendingSuggestion,
    #[error("suggestion was computed against an outdated stop list")]
    StaleSuggestion,
}

pub type Result<T> = std::result::Result<T, CopilotError>;
