/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
///
/// Pricing arithmetic never produces these; they come from configuration,
/// draft parsing and explicit value-object validation.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File or stream errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML catalog errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Internal errors (broken pricing invariants)
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
