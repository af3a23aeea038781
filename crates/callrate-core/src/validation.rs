//! Rate window validation
//!
//! A rate is accepted only when its standard and reduced windows partition
//! one 24-hour day: their wrap-aware durations add up to exactly 86,400
//! seconds and the reduced window opens where the standard window closes.

use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::{ChargingWindow, RateDefinition};
use crate::{AppResult, SECONDS_PER_DAY};

/// Checks the window partition invariant of a rate
pub struct RateWindowValidator;

impl RateWindowValidator {
    /// Validate a pair of windows.
    ///
    /// Side-effect free; safe to run any number of times.
    pub fn validate(standard: &ChargingWindow, reduced: &ChargingWindow) -> AppResult<()> {
        let standard_secs = standard.duration().num_seconds();
        let reduced_secs = reduced.duration().num_seconds();
        let total = standard_secs + reduced_secs;

        if total != SECONDS_PER_DAY {
            warn!(
                "Rejecting rate windows {} / {}: {}s total",
                standard, reduced, total
            );
            return Err(AppError::InvalidRateWindows(format!(
                "standard window lasts {}s and reduced window lasts {}s, together {}s instead of {}s",
                standard_secs, reduced_secs, total, SECONDS_PER_DAY
            )));
        }

        if reduced.begin != standard.end {
            warn!(
                "Rejecting rate windows {} / {}: reduced window does not follow standard window",
                standard, reduced
            );
            return Err(AppError::InvalidRateWindows(format!(
                "reduced window begins at {} but standard window ends at {}",
                reduced.begin, standard.end
            )));
        }

        debug!("Rate windows {} / {} cover the full day", standard, reduced);
        Ok(())
    }

    /// Re-run validation on an accepted rate
    pub fn validate_rate(rate: &RateDefinition) -> AppResult<()> {
        Self::validate(rate.standard_window(), rate.reduced_window())
    }
}
