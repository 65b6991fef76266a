//! Time window value object
//!
//! A closed interval `[reference - past, reference + future]` used to pick
//! samples around a reference instant.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use domain::value_objects::TimeWindow;
//!
//! let reference = NaiveDate::from_ymd_opt(2024, 1, 15)
//!     .and_then(|d| d.and_hms_opt(12, 0, 0))
//!     .expect("valid");
//! let window = TimeWindow::from_hours(1, 0);
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 15)
//!     .and_then(|d| d.and_hms_opt(11, 0, 0))
//!     .expect("valid");
//! assert!(window.contains(&reference, &start));
//! assert!(window.contains(&reference, &reference));
//! ```

use chrono::TimeDelta;
use std::fmt;

use super::TimePoint;
use crate::errors::DomainError;

/// Default number of hours on each side of the reference
pub const DEFAULT_WINDOW_HOURS: u32 = 8;

/// Non-negative durations before and after a reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    past: TimeDelta,
    future: TimeDelta,
}

impl TimeWindow {
    /// Create a window from arbitrary durations
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWindow` if either duration is negative.
    pub fn new(past: TimeDelta, future: TimeDelta) -> Result<Self, DomainError> {
        if past < TimeDelta::zero() {
            return Err(DomainError::InvalidWindow(format!(
                "past duration must not be negative, got {past}"
            )));
        }
        if future < TimeDelta::zero() {
            return Err(DomainError::InvalidWindow(format!(
                "future duration must not be negative, got {future}"
            )));
        }
        Ok(Self { past, future })
    }

    /// Create a window from whole hours
    ///
    /// Hour counts beyond the range of `TimeDelta` saturate to `TimeDelta::MAX`.
    #[must_use]
    pub fn from_hours(past_hours: u32, future_hours: u32) -> Self {
        let hours = |h: u32| TimeDelta::try_hours(i64::from(h)).unwrap_or(TimeDelta::MAX);
        Self {
            past: hours(past_hours),
            future: hours(future_hours),
        }
    }

    /// Duration covered before the reference
    #[must_use]
    pub const fn past(&self) -> TimeDelta {
        self.past
    }

    /// Duration covered after the reference
    #[must_use]
    pub const fn future(&self) -> TimeDelta {
        self.future
    }

    /// Interval endpoints around `reference`
    ///
    /// An endpoint that falls outside the representable range of `T` is
    /// returned as `None`, meaning that side is unbounded.
    #[must_use]
    pub fn bounds<T: TimePoint>(&self, reference: &T) -> (Option<T>, Option<T>) {
        (
            reference.checked_sub_delta(self.past),
            reference.checked_add_delta(self.future),
        )
    }

    /// Closed-interval membership test
    #[must_use]
    pub fn contains<T: TimePoint>(&self, reference: &T, instant: &T) -> bool {
        let (start, end) = self.bounds(reference);
        start.is_none_or(|s| *instant >= s) && end.is_none_or(|e| *instant <= e)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::from_hours(DEFAULT_WINDOW_HOURS, DEFAULT_WINDOW_HOURS)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "-{}h/+{}h",
            self.past.num_hours(),
            self.future.num_hours()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .expect("valid")
    }

    #[test]
    fn default_is_eight_hours_each_side() {
        let window = TimeWindow::default();
        assert_eq!(window.past(), TimeDelta::hours(8));
        assert_eq!(window.future(), TimeDelta::hours(8));
    }

    #[test]
    fn negative_durations_rejected() {
        assert!(TimeWindow::new(TimeDelta::hours(-1), TimeDelta::zero()).is_err());
        assert!(TimeWindow::new(TimeDelta::zero(), TimeDelta::minutes(-5)).is_err());
        assert!(TimeWindow::new(TimeDelta::zero(), TimeDelta::zero()).is_ok());
    }

    #[test]
    fn bounds_are_reference_shifted() {
        let window = TimeWindow::from_hours(2, 3);
        let (start, end) = window.bounds(&at(12));
        assert_eq!(start, Some(at(10)));
        assert_eq!(end, Some(at(15)));
    }

    #[test]
    fn contains_includes_both_endpoints() {
        let window = TimeWindow::from_hours(2, 3);
        assert!(window.contains(&at(12), &at(10)));
        assert!(window.contains(&at(12), &at(15)));
        assert!(!window.contains(&at(12), &at(9)));
        assert!(!window.contains(&at(12), &at(16)));
    }

    #[test]
    fn zero_window_matches_only_reference() {
        let window = TimeWindow::from_hours(0, 0);
        assert!(window.contains(&at(12), &at(12)));
        assert!(!window.contains(&at(12), &at(11)));
        assert!(!window.contains(&at(12), &at(13)));
    }

    #[test]
    fn overflowing_bound_is_unbounded() {
        let window = TimeWindow::from_hours(1, 1);
        let (start, end) = window.bounds(&NaiveDateTime::MAX);
        assert!(start.is_some());
        assert!(end.is_none());
        assert!(window.contains(&NaiveDateTime::MAX, &NaiveDateTime::MAX));
    }

    #[test]
    fn huge_hour_counts_saturate() {
        let window = TimeWindow::from_hours(u32::MAX, 1);
        assert_eq!(window.past(), TimeDelta::MAX);
        assert_eq!(window.future(), TimeDelta::hours(1));
        let (start, _) = window.bounds(&at(12));
        assert!(start.is_none());
    }

    #[test]
    fn display_shows_hours() {
        assert_eq!(TimeWindow::default().to_string(), "-8h/+8h");
    }
}
