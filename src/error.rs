use thiserror::Error;

/// Errors surfaced by the mountain huts library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HutsError {
    #[error("Invalid altitude range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },

    #[error("Invalid {field} '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for mountain huts operations
pub type HutsResult<T> = Result<T, HutsError>;

impl HutsError {
    pub fn invalid_range(range: &str, reason: impl Into<String>) -> Self {
        HutsError::InvalidRange {
            range: range.to_string(),
            reason: reason.into(),
        }
    }
}
