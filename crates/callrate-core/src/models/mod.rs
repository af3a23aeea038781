//! Domain models for CallRate
//!
//! This module contains the core domain models used throughout the application.

pub mod call;
pub mod rate;
pub mod window;

pub use call::{CallRecord, CallSpan};
pub use rate::{parse_time_of_day, Charges, RateConfig, RateDefinition};
pub use window::{ChargingWindow, WindowKind};
