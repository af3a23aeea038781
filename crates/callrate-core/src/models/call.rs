//! Call models
//!
//! `CallRecord` is a call as held by the storage layer; `CallSpan` is the
//! immutable, ordered time span of a finished call that the calculator
//! prices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::AppResult;

/// Start and end of a finished call
///
/// Always satisfies `end >= start`. Timestamps are expected to be
/// normalized to UTC by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCallSpan")]
pub struct CallSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawCallSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawCallSpan> for CallSpan {
    type Error = AppError;

    fn try_from(raw: RawCallSpan) -> AppResult<Self> {
        CallSpan::new(raw.start, raw.end)
    }
}

impl CallSpan {
    /// Build a span, rejecting an end that precedes the start
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if end < start {
            return Err(AppError::InvalidSpan(format!(
                "end {} precedes start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whole seconds between start and end, fractions truncated
    #[inline]
    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

/// Call as produced by the record layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Call identifier assigned by the switch
    pub call_id: i64,

    /// Calling number
    pub source: String,

    /// Called number
    pub destination: String,

    /// Call start timestamp
    pub start_timestamp: DateTime<Utc>,

    /// Call end timestamp (None while the call is in progress)
    pub end_timestamp: Option<DateTime<Utc>>,
}

impl CallRecord {
    /// Open a record for a call that has just started
    pub fn start(call_id: i64, source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            call_id,
            source: source.into(),
            destination: destination.into(),
            start_timestamp: Utc::now(),
            end_timestamp: None,
        }
    }

    /// Whether the call is still in progress
    #[inline]
    pub fn is_open(&self) -> bool {
        self.end_timestamp.is_none()
    }

    /// Check the end timestamp, if any, does not precede the start
    pub fn validate_end_timestamp(&self) -> AppResult<()> {
        match self.end_timestamp {
            Some(end) if end < self.start_timestamp => Err(AppError::InvalidSpan(format!(
                "call {} ends at {} before it starts at {}",
                self.call_id,
                end.to_rfc3339(),
                self.start_timestamp.to_rfc3339()
            ))),
            _ => Ok(()),
        }
    }

    /// Close the call at `end`
    ///
    /// The record is left untouched when `end` is invalid.
    pub fn finish(&mut self, end: DateTime<Utc>) -> AppResult<()> {
        CallSpan::new(self.start_timestamp, end)?;
        self.end_timestamp = Some(end);
        Ok(())
    }

    /// Span of a finished call
    pub fn span(&self) -> AppResult<CallSpan> {
        let end = self.end_timestamp.ok_or_else(|| {
            AppError::InvalidSpan(format!("call {} has not ended yet", self.call_id))
        })?;
        CallSpan::new(self.start_timestamp, end)
    }

    /// Duration for display, "MM:SS"
    pub fn effective_duration(&self) -> Option<String> {
        self.span().ok().map(|span| {
            let secs = span.duration_seconds();
            format!("{:02}:{:02}", secs / 60, secs % 60)
        })
    }
}
