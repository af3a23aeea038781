//! Charging window model
//!
//! A charging window is a daily time-of-day interval `[begin, end)`.
//! When `end <= begin` the window wraps past midnight and each occurrence
//! spans two calendar dates.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SECONDS_PER_DAY;

/// The two charging windows of a rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    /// Standard (peak) window
    Standard,
    /// Reduced (off-peak) window
    Reduced,
}

impl WindowKind {
    /// The window that follows this one
    #[inline]
    pub fn other(self) -> Self {
        match self {
            WindowKind::Standard => WindowKind::Reduced,
            WindowKind::Reduced => WindowKind::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowKind::Standard => "standard",
            WindowKind::Reduced => "reduced",
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Daily time-of-day interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargingWindow {
    /// Time of day the window opens (inclusive)
    pub begin: NaiveTime,

    /// Time of day the window closes (exclusive)
    pub end: NaiveTime,
}

impl ChargingWindow {
    pub fn new(begin: NaiveTime, end: NaiveTime) -> Self {
        Self { begin, end }
    }

    /// Build a window from whole hours and minutes, e.g. `(6, 0, 22, 0)`
    pub fn from_hm(begin_hour: u32, begin_min: u32, end_hour: u32, end_min: u32) -> Option<Self> {
        Some(Self {
            begin: NaiveTime::from_hms_opt(begin_hour, begin_min, 0)?,
            end: NaiveTime::from_hms_opt(end_hour, end_min, 0)?,
        })
    }

    /// Whether each occurrence of the window crosses midnight
    #[inline]
    pub fn wraps_midnight(&self) -> bool {
        self.end <= self.begin
    }

    /// Length of one occurrence, always in `(0, 24h]`
    pub fn duration(&self) -> Duration {
        let begin = i64::from(self.begin.num_seconds_from_midnight());
        let end = i64::from(self.end.num_seconds_from_midnight());

        if self.wraps_midnight() {
            Duration::seconds(end + SECONDS_PER_DAY - begin)
        } else {
            Duration::seconds(end - begin)
        }
    }

    /// The occurrence of this window that opens on `anchor`'s calendar day.
    ///
    /// The end is `None` when it falls past the last representable instant.
    fn occurrence_on(&self, anchor: NaiveDate) -> (NaiveDateTime, Option<NaiveDateTime>) {
        let begin = anchor.and_time(self.begin);
        let end = anchor.and_time(self.end);
        if self.wraps_midnight() {
            (begin, end.checked_add_signed(Duration::days(1)))
        } else {
            (begin, Some(end))
        }
    }

    /// Whether `instant` falls inside an occurrence of the window.
    ///
    /// Both the occurrence opening on the instant's own date and the one
    /// opening the day before are checked, so an instant after midnight is
    /// still found inside a window that opened the previous evening.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        let today = instant.date();
        [today.pred_opt(), Some(today)]
            .into_iter()
            .flatten()
            .map(|anchor| self.occurrence_on(anchor))
            .any(|(begin, end)| begin <= instant && end.map_or(true, |end| instant < end))
    }

    /// First instant strictly after `cursor` at which the window closes.
    ///
    /// The search starts on the cursor's own date and moves forward one day
    /// at a time, so it holds for cursors on any date of a multi-day call.
    /// Returns `None` when the window stays open up to the last representable
    /// instant.
    pub fn next_end_after(&self, cursor: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut boundary = cursor.date().and_time(self.end);
        while boundary <= cursor {
            boundary = boundary.checked_add_signed(Duration::days(1))?;
        }
        Some(boundary)
    }
}

impl fmt::Display for ChargingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin.format("%H:%M"), self.end.format("%H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 12, day)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    #[test]
    fn test_duration_plain_window() {
        let window = ChargingWindow::from_hm(6, 0, 22, 0).unwrap();
        assert!(!window.wraps_midnight());
        assert_eq!(window.duration(), Duration::hours(16));
    }

    #[test]
    fn test_duration_wrapping_window() {
        let window = ChargingWindow::from_hm(22, 0, 6, 0).unwrap();
        assert!(window.wraps_midnight());
        assert_eq!(window.duration(), Duration::hours(8));
    }

    #[test]
    fn test_duration_full_day() {
        // begin == end means a full day
        let window = ChargingWindow::from_hm(6, 0, 6, 0).unwrap();
        assert_eq!(window.duration(), Duration::hours(24));
    }

    #[test]
    fn test_contains_half_open() {
        let window = ChargingWindow::from_hm(6, 0, 22, 0).unwrap();
        assert!(window.contains(at(12, 6, 0, 0)));
        assert!(window.contains(at(12, 21, 59, 59)));
        assert!(!window.contains(at(12, 22, 0, 0)));
        assert!(!window.contains(at(12, 5, 59, 59)));
    }

    #[test]
    fn test_contains_after_midnight_in_wrapping_window() {
        let window = ChargingWindow::from_hm(22, 0, 6, 0).unwrap();
        assert!(window.contains(at(12, 23, 30, 0)));
        assert!(window.contains(at(13, 0, 0, 0)));
        assert!(window.contains(at(13, 5, 59, 59)));
        assert!(!window.contains(at(13, 6, 0, 0)));
        assert!(!window.contains(at(13, 21, 59, 59)));
    }

    #[test]
    fn test_next_end_same_day() {
        let window = ChargingWindow::from_hm(6, 0, 22, 0).unwrap();
        assert_eq!(
            window.next_end_after(at(12, 21, 57, 13)),
            Some(at(12, 22, 0, 0))
        );
    }

    #[test]
    fn test_next_end_rolls_to_next_day() {
        let window = ChargingWindow::from_hm(22, 0, 6, 0).unwrap();
        assert_eq!(window.next_end_after(at(12, 22, 0, 0)), Some(at(13, 6, 0, 0)));

        // A cursor sitting exactly on the end moves to the next occurrence
        let standard = ChargingWindow::from_hm(6, 0, 22, 0).unwrap();
        assert_eq!(
            standard.next_end_after(at(12, 22, 0, 0)),
            Some(at(13, 22, 0, 0))
        );
    }

    #[test]
    fn test_contains_at_first_representable_day() {
        let reduced = ChargingWindow::from_hm(22, 0, 6, 0).unwrap();
        let standard = ChargingWindow::from_hm(6, 0, 22, 0).unwrap();

        // No previous day to open from, so only the same-day occurrence counts
        assert!(!reduced.contains(NaiveDateTime::MIN));
        assert!(!standard.contains(NaiveDateTime::MIN));
        assert!(reduced.contains(NaiveDate::MIN.and_hms_opt(23, 0, 0).unwrap()));
    }

    #[test]
    fn test_window_open_at_last_representable_instant() {
        let reduced = ChargingWindow::from_hm(22, 0, 6, 0).unwrap();
        let late = NaiveDateTime::MAX - Duration::minutes(5);

        assert!(reduced.contains(late));
        assert!(reduced.contains(NaiveDateTime::MAX));
        assert_eq!(reduced.next_end_after(late), None);

        let standard = ChargingWindow::from_hm(6, 0, 22, 0).unwrap();
        assert!(!standard.contains(late));
        assert_eq!(standard.next_end_after(late), None);
    }

    #[test]
    fn test_display() {
        let window = ChargingWindow::from_hm(22, 0, 6, 0).unwrap();
        assert_eq!(window.to_string(), "22:00-06:00");
        assert_eq!(WindowKind::Reduced.to_string(), "reduced");
        assert_eq!(WindowKind::Standard.other(), WindowKind::Reduced);
    }
}
