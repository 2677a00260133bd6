//! Executed-well calculations driven by rig telemetry.

use chrono::{DateTime, TimeDelta, Utc};
use rayon::prelude::*;
use tracing::info;
use wp_core::Real;
use wp_emissions::{SampleSeries, Stage, StepContext, compute_measured_step_co2};
use wp_plan::WellPlan;
use wp_timeseries::{Window, offset_by_days, split_days};

use crate::dataset::{MeasuredSummary, MeasurementPoint, StepPoint};
use crate::error::{AppError, AppResult};
use crate::totals::{PlanSchedule, ScheduledStep};

fn actual_start(plan: &WellPlan) -> AppResult<DateTime<Utc>> {
    plan.actual_start()
        .ok_or_else(|| AppError::MissingActualStartDate(plan.name.clone()))
}

fn complete_context(plan: &WellPlan) -> StepContext<'_> {
    StepContext {
        catalog: &plan.catalog,
        stage: Stage::Complete,
        vessel_uses: &plan.complete.vessel_uses,
        helicopter_uses: &plan.complete.helicopter_uses,
    }
}

fn measured_point(
    plan: &WellPlan,
    schedule: &PlanSchedule<'_>,
    scheduled: &ScheduledStep<'_>,
    telemetry: &SampleSeries,
    at: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<StepPoint> {
    let emissions = compute_measured_step_co2(
        &complete_context(plan),
        plan.factors,
        scheduled.step,
        telemetry,
        start,
        end,
        schedule.measured_totals(scheduled),
    )?;
    Ok(StepPoint {
        at,
        step: scheduled.step.id,
        emissions,
    })
}

/// Measured CO2 of every executed step, one point per calendar day.
pub fn compute_measured_daily_dataset(plan: &WellPlan) -> AppResult<Vec<StepPoint>> {
    let plan_start = actual_start(plan)?;
    info!(plan = %plan.name, "generating measured daily dataset");
    let schedule = PlanSchedule::complete(plan)?;
    let telemetry = plan.telemetry_series();

    let per_step: Vec<Vec<StepPoint>> = schedule
        .steps
        .par_iter()
        .map(|scheduled| -> AppResult<Vec<StepPoint>> {
            split_days(plan_start, scheduled.offset, scheduled.duration)?
                .map(|day| {
                    measured_point(
                        plan,
                        &schedule,
                        scheduled,
                        &telemetry,
                        day.day(),
                        day.start,
                        day.end,
                    )
                })
                .collect::<AppResult<Vec<_>>>()
        })
        .collect::<AppResult<_>>()?;
    Ok(per_step.into_iter().flatten().collect())
}

/// Measured CO2 of every executed step, one point per clock hour inside
/// `window`.
pub fn compute_measured_windowed_dataset(
    plan: &WellPlan,
    window: Window,
) -> AppResult<Vec<StepPoint>> {
    let plan_start = actual_start(plan)?;
    info!(
        plan = %plan.name,
        start = %window.start,
        end = %window.end,
        "generating measured hourly dataset"
    );
    let schedule = PlanSchedule::complete(plan)?;
    let telemetry = plan.telemetry_series();

    let per_step: Vec<Vec<StepPoint>> = schedule
        .steps
        .par_iter()
        .map(|scheduled| -> AppResult<Vec<StepPoint>> {
            let mut points = Vec::new();
            let step_start = offset_by_days(plan_start, scheduled.offset)?;
            let step_end = offset_by_days(plan_start, scheduled.offset + scheduled.duration)?;
            if !window.overlaps(step_start, step_end) {
                return Ok(points);
            }
            for day in split_days(plan_start, scheduled.offset, scheduled.duration)? {
                for hour in day.hours() {
                    if !window.contains(hour.hour) {
                        continue;
                    }
                    points.push(measured_point(
                        plan,
                        &schedule,
                        scheduled,
                        &telemetry,
                        hour.hour,
                        hour.start,
                        hour.end,
                    )?);
                }
            }
            Ok(points)
        })
        .collect::<AppResult<_>>()?;
    Ok(per_step.into_iter().flatten().collect())
}

pub fn compute_measured_summary(plan: &WellPlan) -> AppResult<MeasuredSummary> {
    let plan_start = actual_start(plan)?;
    let schedule = PlanSchedule::complete(plan)?;
    let telemetry = plan.telemetry_series();

    let results = schedule
        .steps
        .par_iter()
        .map(|scheduled| -> AppResult<StepPoint> {
            // the next step starts where this one ends
            let start = offset_by_days(plan_start, scheduled.offset)?;
            let end = offset_by_days(plan_start, scheduled.offset + scheduled.duration)?;
            measured_point(plan, &schedule, scheduled, &telemetry, start, start, end)
        })
        .collect::<AppResult<Vec<_>>>()?;

    let mut summary = MeasuredSummary {
        total_baseline: 0.0,
        total_target: 0.0,
        total_duration: schedule.total_duration,
    };
    for point in &results {
        summary.total_baseline += point.emissions.baseline;
        summary.total_target += point.emissions.target;
    }
    Ok(summary)
}

/// Raw telemetry over the executed well.
///
/// Without a window: one point per day from the actual start date, holding
/// the day's average or `None` when nothing was recorded. With a window:
/// one point per clock hour inside it, holding the sample taken exactly on
/// the hour or zero.
pub fn compute_measurement_dataset(
    plan: &WellPlan,
    window: Option<Window>,
) -> AppResult<Vec<MeasurementPoint>> {
    let plan_start = actual_start(plan)?;
    let telemetry = plan.telemetry_series();
    let total: Real = plan.complete.steps.iter().map(|s| s.duration).sum();

    let mut out = Vec::new();
    match window {
        Some(window) => {
            let plan_end = offset_by_days(plan_start, total)?;
            let mut hour = plan_start;
            while hour <= plan_end {
                if window.contains(hour) {
                    let value = telemetry
                        .samples()
                        .iter()
                        .find(|s| s.at == hour)
                        .map_or(0.0, |s| s.value);
                    out.push(MeasurementPoint {
                        at: hour,
                        value: Some(value),
                    });
                }
                hour += TimeDelta::hours(1);
            }
        }
        None => {
            // a whole number of days ends on the previous midnight
            let plan_end = if total > 0.0 && total.fract() == 0.0 {
                offset_by_days(plan_start, total - 1.0)?
            } else {
                offset_by_days(plan_start, total)?
            };
            let mut day = plan_start;
            while day <= plan_end {
                let next = day + TimeDelta::days(1);
                let samples = telemetry.range(day, next);
                let value = if samples.is_empty() {
                    None
                } else {
                    Some(samples.iter().map(|s| s.value).sum::<Real>() / samples.len() as Real)
                };
                out.push(MeasurementPoint { at: day, value });
                day = next;
            }
        }
    }
    Ok(out)
}
