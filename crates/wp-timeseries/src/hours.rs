//! Splitting a (sub-)day span into clock hours.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use wp_core::{ROUNDING_ERROR, Real, in_days, ns};

use crate::error::{TimeseriesError, TimeseriesResult};
use crate::{hour_key, offset_by_days};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourSlice {
    /// Start of the clock hour the slice belongs to.
    pub hour: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Length of the slice, in days.
    pub duration: Real,
}

impl HourSlice {
    /// Share of the clock hour covered by the slice.
    pub fn hour_fraction(&self) -> Real {
        self.duration * wp_core::HOURS_PER_DAY
    }
}

#[derive(Debug, Clone)]
pub struct HourSplit {
    cursor: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Hour slices of `[start, start + duration)`; `duration` is in days and
/// may not exceed one (up to rounding noise).
pub fn split_hours(start: DateTime<Utc>, duration: Real) -> TimeseriesResult<HourSplit> {
    if duration > 1.0 + ROUNDING_ERROR {
        return Err(TimeseriesError::DurationExceedsDay { duration });
    }
    if duration.is_nan() {
        return Err(TimeseriesError::InvalidArg {
            what: "hour split duration is NaN",
        });
    }
    Ok(split_hours_between(
        start,
        offset_by_days(start, duration.max(0.0))?,
    ))
}

/// Hour slices of `[start, end)`; empty when `end` is not after `start`.
pub fn split_hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> HourSplit {
    HourSplit { cursor: start, end }
}

fn delta_days(delta: TimeDelta) -> Real {
    // spans are at most a day, nanoseconds cannot overflow
    in_days(ns(delta.num_nanoseconds().unwrap_or(i64::MAX) as Real))
}

impl Iterator for HourSplit {
    type Item = HourSlice;

    fn next(&mut self) -> Option<HourSlice> {
        if self.cursor >= self.end {
            return None;
        }
        let hour = hour_key(self.cursor);
        let end = hour
            .checked_add_signed(TimeDelta::hours(1))
            .map_or(self.end, |next| next.min(self.end));
        let slice = HourSlice {
            hour,
            start: self.cursor,
            end,
            duration: delta_days(end - self.cursor),
        };
        self.cursor = end;
        Some(slice)
    }
}
