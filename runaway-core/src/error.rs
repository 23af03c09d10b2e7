use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("repel radius must be positive, got {0}")]
    NonPositiveRepelRadius(f32),
    #[error("jump range is inverted: min {min} > max {max}")]
    InvertedJumpRange { min: f32, max: f32 },
    #[error("{field} must be in (0, 1), got {value}")]
    EaseOutOfRange { field: &'static str, value: f32 },
    #[error("edge avoidance strength must be in [0, 1], got {0}")]
    EdgeAvoidanceOutOfRange(f32),
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("candidate count must be at least 1")]
    NoCandidates,
    #[error("failed to parse controller config: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
