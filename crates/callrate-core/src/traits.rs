//! Common traits for services
//!
//! Defines the seam between the record layer and the pricing logic.

use crate::models::{CallRecord, CallSpan, RateDefinition};
use crate::AppResult;

/// Prices a finished call against a rate
///
/// Implementations must be pure: the same inputs always yield the same
/// cost, so a pricer can be shared freely across threads.
pub trait CallPricer: Send + Sync {
    /// Cost of a call span in the smallest currency unit
    fn price(&self, span: &CallSpan, rate: &RateDefinition) -> AppResult<u64>;

    /// Cost of a stored call record
    ///
    /// Fails with `InvalidSpan` while the call has not ended.
    fn price_record(&self, record: &CallRecord, rate: &RateDefinition) -> AppResult<u64> {
        let span = record.span()?;
        self.price(&span, rate)
    }
}
