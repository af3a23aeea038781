//! Business logic services for CallRate
//!
//! This crate contains the call pricing logic that sits on top of the core
//! models.
//!
//! # Services
//!
//! - `CallCostCalculator` - Prices a finished call against a validated rate,
//!   walking the call window by window across any number of days

pub mod rating;

pub use rating::{CallCostCalculator, CostBreakdown, CostSegment};
