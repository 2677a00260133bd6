//! Dataset records and the helpers that spread step totals over calendar
//! buckets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wp_core::{Real, StepId};
use wp_emissions::EmissionResult;
use wp_timeseries::{Window, offset_by_days, split_days};

use crate::error::AppResult;

/// Emissions of one step inside one calendar bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepPoint {
    pub at: DateTime<Utc>,
    pub step: StepId,
    #[serde(flatten)]
    pub emissions: EmissionResult,
}

/// Emissions inside one calendar bucket, not tied to a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub emissions: EmissionResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_baseline: Real,
    pub total_target: Real,
    pub total_improved_duration: Real,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredSummary {
    pub total_baseline: Real,
    pub total_target: Real,
    pub total_duration: Real,
}

/// Raw sensor value of one calendar bucket; `None` when nothing was
/// recorded that day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    pub at: DateTime<Utc>,
    pub value: Option<Real>,
}

/// Spread `total`, produced over `duration` days starting `offset` days
/// after `plan_start`, over the calendar days it covers. Points are keyed
/// by UTC midnight.
pub(crate) fn spread_daily(
    total: &EmissionResult,
    duration: Real,
    offset: Real,
    plan_start: DateTime<Utc>,
) -> AppResult<Vec<(DateTime<Utc>, EmissionResult)>> {
    if duration <= 0.0 {
        return Ok(Vec::new());
    }
    Ok(split_days(plan_start, offset, duration)?
        .map(|day| (day.day(), total.scaled(day.duration / duration)))
        .collect())
}

/// Same as [`spread_daily`] with hourly buckets, keeping only the hours
/// whose start lies in `window`.
pub(crate) fn spread_hourly(
    total: &EmissionResult,
    duration: Real,
    offset: Real,
    plan_start: DateTime<Utc>,
    window: Window,
) -> AppResult<Vec<(DateTime<Utc>, EmissionResult)>> {
    let mut out = Vec::new();
    if duration <= 0.0 {
        return Ok(out);
    }
    let step_start = offset_by_days(plan_start, offset)?;
    let step_end = offset_by_days(plan_start, offset + duration)?;
    if !window.overlaps(step_start, step_end) {
        return Ok(out);
    }

    for day in split_days(plan_start, offset, duration)? {
        for hour in day.hours() {
            if window.contains(hour.hour) {
                out.push((hour.hour, total.scaled(hour.duration / duration)));
            }
        }
    }
    Ok(out)
}
