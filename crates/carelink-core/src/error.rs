//! Error types for carelink

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CareError {
    // Positioning errors
    #[error("Positioning unavailable: {reason}")]
    LocationUnavailable { reason: String },

    // Data access errors
    #[error("Service '{service}' unavailable: {reason}")]
    ServiceUnavailable { service: String, reason: String },

    // Exclusive-state errors (recording/playback coordination)
    #[error("Invalid operation: {reason}")]
    InvalidOperation { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CareError {
    /// Positioning failure with a reason
    pub fn location_unavailable(reason: impl Into<String>) -> Self {
        CareError::LocationUnavailable { reason: reason.into() }
    }

    /// Transport-level failure of a data-access service
    pub fn service_unavailable(service: impl Into<String>, reason: impl Into<String>) -> Self {
        CareError::ServiceUnavailable { service: service.into(), reason: reason.into() }
    }

    /// Rejected operation against exclusive state
    pub fn invalid_operation(reason: impl Into<String>) -> Self {
        CareError::InvalidOperation { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, CareError>;
