//! Call cost calculation
//!
//! Prices a finished call against a validated rate. The call is charged the
//! standing fee of the window it starts in, then walked forward one window
//! segment at a time: every segment bills its whole minutes at that
//! window's per-minute charge, and the walk switches windows at each
//! boundary until the call's duration is used up.

use callrate_core::{
    models::{CallRecord, CallSpan, RateDefinition, WindowKind},
    traits::CallPricer,
    AppError, AppResult,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

/// Portion of a call that lies inside a single window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostSegment {
    /// Window the segment is billed in
    pub window: WindowKind,

    pub start: DateTime<Utc>,

    pub end: DateTime<Utc>,

    /// Whole seconds spent in the segment
    pub seconds: i64,

    /// Full minutes billed (partial minutes are dropped per segment)
    pub billed_minutes: u64,

    /// `billed_minutes` times the window's per-minute charge
    pub charge: u64,
}

/// Itemized cost of a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    /// Window active when the call started
    pub starting_window: WindowKind,

    /// Standing charge of the starting window
    pub standing_charge: u64,

    /// Segments in call order
    pub segments: Vec<CostSegment>,

    /// Standing charge plus every segment charge
    pub total: u64,
}

impl CostBreakdown {
    /// Full minutes billed in one window across all segments
    pub fn billed_minutes(&self, window: WindowKind) -> u64 {
        self.segments
            .iter()
            .filter(|s| s.window == window)
            .map(|s| s.billed_minutes)
            .sum()
    }
}

/// Stateless call pricer
#[derive(Debug, Clone, Copy, Default)]
pub struct CallCostCalculator;

impl CallCostCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Cost of a call in the smallest currency unit
    #[instrument(skip(self, rate))]
    pub fn cost(&self, span: &CallSpan, rate: &RateDefinition) -> AppResult<u64> {
        let walk = Self::walk(span, rate, |_| {})?;
        debug!("Calculated cost: {} for {}s", walk.total, span.duration_seconds());
        Ok(walk.total)
    }

    /// Cost of a stored record; fails with `InvalidSpan` for calls still in progress
    pub fn cost_record(&self, record: &CallRecord, rate: &RateDefinition) -> AppResult<u64> {
        record.validate_end_timestamp()?;
        let span = record.span()?;
        self.cost(&span, rate)
    }

    /// Itemized cost of a call
    #[instrument(skip(self, rate))]
    pub fn breakdown(&self, span: &CallSpan, rate: &RateDefinition) -> AppResult<CostBreakdown> {
        let mut segments = Vec::new();
        let walk = Self::walk(span, rate, |segment| {
            debug!(
                "Segment {} {}s: {} min = {}",
                segment.window, segment.seconds, segment.billed_minutes, segment.charge
            );
            segments.push(segment);
        })?;

        debug!(
            "Calculated cost: {} over {} segments for {}s",
            walk.total,
            segments.len(),
            span.duration_seconds()
        );

        Ok(CostBreakdown {
            starting_window: walk.starting_window,
            standing_charge: walk.standing_charge,
            segments,
            total: walk.total,
        })
    }

    /// Walk the call window by window, handing each billed segment to
    /// `on_segment` and accumulating the total.
    ///
    /// A fractional start second can leave a zero-second slice before the
    /// first boundary; it bills nothing and is not reported.
    fn walk<F>(span: &CallSpan, rate: &RateDefinition, mut on_segment: F) -> AppResult<Walk>
    where
        F: FnMut(CostSegment),
    {
        let start = span.start().naive_utc();
        let starting_window = rate.window_at(start);
        let standing_charge = rate.standing_charge(starting_window);

        debug!(
            "Call starts in {} window, standing charge {}",
            starting_window, standing_charge
        );

        let mut total = standing_charge;
        let mut remaining = span.duration_seconds();
        let mut window = starting_window;
        let mut cursor = start;

        while remaining > 0 {
            // No boundary means the window stays open to the end of the time line
            let switch = rate
                .window(window)
                .next_end_after(cursor)
                .map(|boundary| (boundary, (boundary - cursor).num_seconds()))
                .filter(|&(_, until_switch)| until_switch < remaining);

            let (seconds, segment_end) = match switch {
                Some((boundary, until_switch)) => (until_switch, boundary),
                None => (remaining, span.end().naive_utc()),
            };

            if seconds > 0 {
                let segment = Self::bill_segment(rate, window, cursor, segment_end, seconds)?;
                total = total
                    .checked_add(segment.charge)
                    .ok_or(AppError::CostOverflow)?;
                on_segment(segment);
            }

            remaining -= seconds;
            if let Some((boundary, _)) = switch {
                window = window.other();
                cursor = boundary;
            }
        }

        Ok(Walk {
            starting_window,
            standing_charge,
            total,
        })
    }

    fn bill_segment(
        rate: &RateDefinition,
        window: WindowKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
        seconds: i64,
    ) -> AppResult<CostSegment> {
        let billed_minutes = seconds.unsigned_abs() / 60;
        let charge = billed_minutes
            .checked_mul(rate.minute_charge(window))
            .ok_or(AppError::CostOverflow)?;

        Ok(CostSegment {
            window,
            start: start.and_utc(),
            end: end.and_utc(),
            seconds,
            billed_minutes,
            charge,
        })
    }
}

/// Running result of a call walk
struct Walk {
    starting_window: WindowKind,
    standing_charge: u64,
    total: u64,
}

impl CallPricer for CallCostCalculator {
    fn price(&self, span: &CallSpan, rate: &RateDefinition) -> AppResult<u64> {
        self.cost(span, rate)
    }
}
