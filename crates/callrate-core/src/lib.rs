//! CallRate Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the CallRate system. It includes:
//!
//! - Domain models (charging windows, rate definitions, call spans and records)
//! - Rate window validation
//! - The `CallPricer` seam used by the storage layer
//! - Unified error handling
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;
pub mod validation;

pub use config::AppConfig;
pub use error::AppError;
pub use validation::RateWindowValidator;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Seconds in one calendar day
pub const SECONDS_PER_DAY: i64 = 86_400;
