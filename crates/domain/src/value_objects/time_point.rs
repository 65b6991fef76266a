//! Instants a series can be keyed by

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};

/// A totally ordered point in time that can be shifted by a `TimeDelta`
///
/// Implemented for naive wall-clock times and for zone-aware times. A series
/// and its reference instant share one implementing type, so naive and aware
/// instants can never be compared with each other.
pub trait TimePoint: Ord + Clone {
    /// `self - delta`, or `None` if the result is out of range
    fn checked_sub_delta(&self, delta: TimeDelta) -> Option<Self>;

    /// `self + delta`, or `None` if the result is out of range
    fn checked_add_delta(&self, delta: TimeDelta) -> Option<Self>;
}

impl TimePoint for NaiveDateTime {
    fn checked_sub_delta(&self, delta: TimeDelta) -> Option<Self> {
        self.checked_sub_signed(delta)
    }

    fn checked_add_delta(&self, delta: TimeDelta) -> Option<Self> {
        self.checked_add_signed(delta)
    }
}

impl<Tz: TimeZone> TimePoint for DateTime<Tz> {
    fn checked_sub_delta(&self, delta: TimeDelta) -> Option<Self> {
        self.clone().checked_sub_signed(delta)
    }

    fn checked_add_delta(&self, delta: TimeDelta) -> Option<Self> {
        self.clone().checked_add_signed(delta)
    }
}
