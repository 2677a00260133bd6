// wp-core/src/units.rs

use uom::si::f64::Time as UomTime;
use uom::si::time::{day, hour, nanosecond, second};

pub type Time = UomTime;

pub const HOURS_PER_DAY: f64 = 24.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

#[inline]
pub fn days(v: f64) -> Time {
    Time::new::<day>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    Time::new::<hour>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    Time::new::<second>(v)
}

#[inline]
pub fn ns(v: f64) -> Time {
    Time::new::<nanosecond>(v)
}

#[inline]
pub fn in_days(t: Time) -> f64 {
    t.get::<day>()
}

#[inline]
pub fn in_hours(t: Time) -> f64 {
    t.get::<hour>()
}

#[inline]
pub fn in_seconds(t: Time) -> f64 {
    t.get::<second>()
}

#[inline]
pub fn in_nanoseconds(t: Time) -> f64 {
    t.get::<nanosecond>()
}
