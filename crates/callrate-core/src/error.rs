//! Unified error handling for CallRate
//!
//! Every failure the rating core can report is a variant of [`AppError`].
//! Both validation families (rate windows and call spans) are data-integrity
//! errors: they are surfaced synchronously and never retried.

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // ==================== Rate Errors ====================
    #[error("Invalid rate windows: {0}")]
    InvalidRateWindows(String),

    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    // ==================== Call Errors ====================
    #[error("Invalid call span: {0}")]
    InvalidSpan(String),

    #[error("Call cost exceeds the representable range")]
    CostOverflow,

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    // ==================== Internal Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidRateWindows(_) => "invalid_rate_windows",
            AppError::InvalidTimeOfDay(_) => "invalid_time_of_day",
            AppError::InvalidSpan(_) => "invalid_span",
            AppError::CostOverflow => "cost_overflow",
            AppError::Validation(_) => "validation_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
