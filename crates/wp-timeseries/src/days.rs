//! Splitting a span into calendar days.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use wp_core::{ROUNDING_ERROR, Real};

use crate::error::TimeseriesResult;
use crate::hours::{HourSplit, split_hours_between};
use crate::{day_key, offset_by_days};

/// Part of a span that falls inside one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaySlice {
    /// First instant of the slice.
    pub start: DateTime<Utc>,
    /// First instant after the slice; the next slice starts here.
    pub end: DateTime<Utc>,
    /// Length of the slice, in days (at most one).
    pub duration: Real,
}

impl DaySlice {
    /// Midnight of the slice's day.
    pub fn day(&self) -> DateTime<Utc> {
        day_key(self.start)
    }

    /// Clock hours of `[start, end)`.
    pub fn hours(&self) -> HourSplit {
        split_hours_between(self.start, self.end)
    }
}

/// Iterator over the day slices of `[offset, offset + duration)` measured
/// in days from a plan start.
///
/// Day boundaries are whole-day offsets from the plan start. Cloning the
/// iterator restarts it from the same position.
#[derive(Debug, Clone)]
pub struct DaySplit {
    plan_start: DateTime<Utc>,
    cursor: DateTime<Utc>,
    end: DateTime<Utc>,
    offset: Real,
    remaining: Real,
}

/// Negative offsets and durations are treated as zero. Fails when the span
/// ends outside the calendar range.
pub fn split_days(
    plan_start: DateTime<Utc>,
    offset: Real,
    duration: Real,
) -> TimeseriesResult<DaySplit> {
    let offset = offset.max(0.0);
    let remaining = duration.max(0.0);
    Ok(DaySplit {
        plan_start,
        cursor: offset_by_days(plan_start, offset)?,
        end: offset_by_days(plan_start, offset + remaining)?,
        offset,
        remaining,
    })
}

impl Iterator for DaySplit {
    type Item = DaySlice;

    fn next(&mut self) -> Option<DaySlice> {
        if self.remaining <= 0.0 {
            return None;
        }
        let next_boundary = self.offset.floor() + 1.0;
        let left_in_day = next_boundary - self.offset;
        let start = self.cursor;

        // a leftover below rounding noise stays in the current slice
        let (duration, end) = if self.remaining <= left_in_day + ROUNDING_ERROR {
            let d = self.remaining;
            self.remaining = 0.0;
            (d, self.end)
        } else {
            self.remaining -= left_in_day;
            self.offset = next_boundary;
            // boundaries before `end` are always representable
            let boundary = TimeDelta::try_days(next_boundary as i64)
                .and_then(|d| self.plan_start.checked_add_signed(d))
                .map_or(self.end, |b| b.min(self.end));
            (left_in_day, boundary)
        };
        self.cursor = end;
        Some(DaySlice {
            start,
            end,
            duration,
        })
    }
}
