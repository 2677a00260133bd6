//! wp-timeseries: calendar decomposition of step durations.
//!
//! A plan is a sequence of steps laid end to end from a start instant.
//! Each step covers `[offset, offset + duration)` days; this crate cuts such
//! spans at day and hour boundaries so per-step totals can be spread over
//! calendar buckets.

pub mod days;
pub mod error;
pub mod hours;
pub mod window;

pub use days::{DaySlice, DaySplit, split_days};
pub use error::{TimeseriesError, TimeseriesResult};
pub use hours::{HourSlice, HourSplit, split_hours, split_hours_between};
pub use window::Window;

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use wp_core::{Real, days, in_nanoseconds};

/// Fractional days as a calendar delta.
///
/// Whole days are added exactly; only the fractional remainder goes
/// through a float conversion, rounded to the nanosecond.
pub fn days_delta(duration: Real) -> TimeseriesResult<TimeDelta> {
    if !duration.is_finite() {
        return Err(TimeseriesError::InvalidArg {
            what: "day offset is not finite",
        });
    }
    let whole = duration.trunc();
    let fraction = in_nanoseconds(days(duration - whole)).round() as i64;
    TimeDelta::try_days(whole as i64)
        .and_then(|d| d.checked_add(&TimeDelta::nanoseconds(fraction)))
        .ok_or(TimeseriesError::OutOfRange { duration })
}

/// Instant `duration` days after `start`.
pub fn offset_by_days(start: DateTime<Utc>, duration: Real) -> TimeseriesResult<DateTime<Utc>> {
    start
        .checked_add_signed(days_delta(duration)?)
        .ok_or(TimeseriesError::OutOfRange { duration })
}

/// UTC midnight of the day containing `at`; the key of daily series.
pub fn day_key(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Start of the hour containing `at`.
pub fn hour_key(at: DateTime<Utc>) -> DateTime<Utc> {
    let into_hour = TimeDelta::seconds(i64::from(at.minute()) * 60 + i64::from(at.second()))
        + TimeDelta::nanoseconds(i64::from(at.nanosecond()));
    at - into_hour
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn keys_truncate() {
        let at = Utc.with_ymd_and_hms(2024, 2, 29, 17, 42, 9).unwrap();
        assert_eq!(day_key(at), Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        assert_eq!(hour_key(at), Utc.with_ymd_and_hms(2024, 2, 29, 17, 0, 0).unwrap());
    }

    #[test]
    fn fractional_day_offsets() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            offset_by_days(start, 1.25).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 6, 0, 0).unwrap()
        );
    }

    #[test]
    fn whole_day_offsets_land_on_midnight() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for d in 0..400 {
            assert_eq!(
                offset_by_days(start, f64::from(d)).unwrap(),
                start + TimeDelta::days(i64::from(d))
            );
        }
    }

    #[test]
    fn unrepresentable_offsets_are_errors() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            offset_by_days(start, 1e12),
            Err(TimeseriesError::OutOfRange { .. })
        ));
        assert!(matches!(
            days_delta(1e300),
            Err(TimeseriesError::OutOfRange { .. })
        ));
        assert!(days_delta(f64::NAN).is_err());
    }
}
