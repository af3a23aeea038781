//! Rate definition model
//!
//! A rate splits every calendar day into a standard and a reduced charging
//! window, each with a per-call standing charge and a per-minute charge.
//! `RateConfig` is the loosely typed input form (as read from configuration
//! files or the storage layer); `RateDefinition` is the validated form the
//! calculator consumes.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::window::{ChargingWindow, WindowKind};
use crate::validation::RateWindowValidator;
use crate::AppResult;

/// Format used for time-of-day boundaries, e.g. "6:00" or "22:00"
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Parse a `H:MM` / `HH:MM` boundary into a time of day
pub fn parse_time_of_day(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_OF_DAY_FORMAT)
        .map_err(|e| AppError::InvalidTimeOfDay(format!("'{}': {}", value, e)))
}

/// Charges applied within one window, in the smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Charges {
    /// Charged once per call that starts in the window
    pub standing: u64,

    /// Charged per full minute billed in the window
    pub per_minute: u64,
}

impl Charges {
    pub fn new(standing: u64, per_minute: u64) -> Self {
        Self {
            standing,
            per_minute,
        }
    }
}

/// Validated rate definition
///
/// Can only be built through [`RateDefinition::new`] (or the conversions
/// that call it), so every instance satisfies the window partition
/// invariant checked by [`RateWindowValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RateConfig", into = "RateConfig")]
pub struct RateDefinition {
    standard: ChargingWindow,
    reduced: ChargingWindow,
    standard_charges: Charges,
    reduced_charges: Charges,
}

impl RateDefinition {
    /// Validate the windows and build the rate
    pub fn new(
        standard: ChargingWindow,
        reduced: ChargingWindow,
        standard_charges: Charges,
        reduced_charges: Charges,
    ) -> AppResult<Self> {
        RateWindowValidator::validate(&standard, &reduced)?;

        Ok(Self {
            standard,
            reduced,
            standard_charges,
            reduced_charges,
        })
    }

    /// Copy of this rate with new windows, validated again
    pub fn with_windows(&self, standard: ChargingWindow, reduced: ChargingWindow) -> AppResult<Self> {
        Self::new(standard, reduced, self.standard_charges, self.reduced_charges)
    }

    /// Copy of this rate with new charges
    ///
    /// Charges cannot break the window invariant, so no validation runs.
    pub fn with_charges(&self, standard_charges: Charges, reduced_charges: Charges) -> Self {
        Self {
            standard_charges,
            reduced_charges,
            ..self.clone()
        }
    }

    #[inline]
    pub fn standard_window(&self) -> &ChargingWindow {
        &self.standard
    }

    #[inline]
    pub fn reduced_window(&self) -> &ChargingWindow {
        &self.reduced
    }

    /// Window of the given kind
    #[inline]
    pub fn window(&self, kind: WindowKind) -> &ChargingWindow {
        match kind {
            WindowKind::Standard => &self.standard,
            WindowKind::Reduced => &self.reduced,
        }
    }

    /// Charges of the given window
    #[inline]
    pub fn charges(&self, kind: WindowKind) -> Charges {
        match kind {
            WindowKind::Standard => self.standard_charges,
            WindowKind::Reduced => self.reduced_charges,
        }
    }

    #[inline]
    pub fn standing_charge(&self, kind: WindowKind) -> u64 {
        self.charges(kind).standing
    }

    #[inline]
    pub fn minute_charge(&self, kind: WindowKind) -> u64 {
        self.charges(kind).per_minute
    }

    /// Window active at `instant`.
    ///
    /// The standard window is tested as a half-open interval; anything
    /// outside it belongs to the reduced window.
    pub fn window_at(&self, instant: NaiveDateTime) -> WindowKind {
        if self.standard.contains(instant) {
            WindowKind::Standard
        } else {
            WindowKind::Reduced
        }
    }
}

/// Rate input as supplied by configuration or the record layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RateConfig {
    /// Standard window opening time (H:MM)
    #[validate(length(min = 4, max = 5, message = "Time of day must be H:MM or HH:MM"))]
    pub standard_begin: String,

    /// Standard window closing time (H:MM)
    #[validate(length(min = 4, max = 5, message = "Time of day must be H:MM or HH:MM"))]
    pub standard_end: String,

    /// Reduced window opening time (H:MM)
    #[validate(length(min = 4, max = 5, message = "Time of day must be H:MM or HH:MM"))]
    pub reduced_begin: String,

    /// Reduced window closing time (H:MM)
    #[validate(length(min = 4, max = 5, message = "Time of day must be H:MM or HH:MM"))]
    pub reduced_end: String,

    #[validate(range(min = 0, message = "Charges cannot be negative"))]
    pub standard_standing_charge: i64,

    #[validate(range(min = 0, message = "Charges cannot be negative"))]
    pub standard_minute_charge: i64,

    #[validate(range(min = 0, message = "Charges cannot be negative"))]
    pub reduced_standing_charge: i64,

    #[validate(range(min = 0, message = "Charges cannot be negative"))]
    pub reduced_minute_charge: i64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            standard_begin: "06:00".to_string(),
            standard_end: "22:00".to_string(),
            reduced_begin: "22:00".to_string(),
            reduced_end: "06:00".to_string(),
            standard_standing_charge: 36,
            standard_minute_charge: 9,
            reduced_standing_charge: 36,
            reduced_minute_charge: 0,
        }
    }
}

fn to_charge(field: &str, value: i64) -> AppResult<u64> {
    u64::try_from(value)
        .map_err(|_| AppError::Validation(format!("{}: charges cannot be negative", field)))
}

fn from_charge(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl TryFrom<RateConfig> for RateDefinition {
    type Error = AppError;

    fn try_from(config: RateConfig) -> AppResult<Self> {
        config.validate()?;

        let standard = ChargingWindow::new(
            parse_time_of_day(&config.standard_begin)?,
            parse_time_of_day(&config.standard_end)?,
        );
        let reduced = ChargingWindow::new(
            parse_time_of_day(&config.reduced_begin)?,
            parse_time_of_day(&config.reduced_end)?,
        );

        RateDefinition::new(
            standard,
            reduced,
            Charges::new(
                to_charge("standard_standing_charge", config.standard_standing_charge)?,
                to_charge("standard_minute_charge", config.standard_minute_charge)?,
            ),
            Charges::new(
                to_charge("reduced_standing_charge", config.reduced_standing_charge)?,
                to_charge("reduced_minute_charge", config.reduced_minute_charge)?,
            ),
        )
    }
}

impl From<RateDefinition> for RateConfig {
    fn from(rate: RateDefinition) -> Self {
        let fmt = |t: NaiveTime| t.format(TIME_OF_DAY_FORMAT).to_string();
        Self {
            standard_begin: fmt(rate.standard.begin),
            standard_end: fmt(rate.standard.end),
            reduced_begin: fmt(rate.reduced.begin),
            reduced_end: fmt(rate.reduced.end),
            standard_standing_charge: from_charge(rate.standard_charges.standing),
            standard_minute_charge: from_charge(rate.standard_charges.per_minute),
            reduced_standing_charge: from_charge(rate.reduced_charges.standing),
            reduced_minute_charge: from_charge(rate.reduced_charges.per_minute),
        }
    }
}
