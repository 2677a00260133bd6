//! Planned-well calculations: per-step results, plan totals, datasets and
//! the CO2 saved by productivity initiatives.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;
use wp_core::{Real, StepId};
use wp_emissions::{Co2, EmissionFactors, EmissionResult, Nox, Pollutant, StepContext, compute_step};
use wp_plan::WellPlan;
use wp_timeseries::Window;

use crate::dataset::{PlanSummary, Point, StepPoint, spread_daily, spread_hourly};
use crate::error::{AppError, AppResult};
use crate::totals::{PlanSchedule, ScheduledStep};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollutantKind {
    #[default]
    Co2,
    Nox,
}

impl PollutantKind {
    pub fn strategy(self, factors: EmissionFactors) -> Box<dyn Pollutant> {
        match self {
            PollutantKind::Co2 => Box::new(Co2::new(factors)),
            PollutantKind::Nox => Box::new(Nox),
        }
    }
}

fn planned_context(plan: &WellPlan) -> StepContext<'_> {
    StepContext {
        catalog: &plan.catalog,
        stage: wp_emissions::Stage::Planned,
        vessel_uses: &plan.planned.vessel_uses,
        helicopter_uses: &plan.planned.helicopter_uses,
    }
}

/// Results of every planned step, in step order.
fn compute_steps(
    plan: &WellPlan,
    schedule: &PlanSchedule<'_>,
    pollutant: &dyn Pollutant,
) -> AppResult<Vec<EmissionResult>> {
    let ctx = planned_context(plan);
    schedule
        .steps
        .par_iter()
        .map(|scheduled| {
            compute_step(pollutant, &ctx, scheduled.step, schedule.durations(scheduled))
                .map_err(AppError::from)
        })
        .collect()
}

/// Emissions of one planned step over its total (or improved) duration.
pub fn compute_planned_step(
    plan: &WellPlan,
    pollutant: &dyn Pollutant,
    step_id: StepId,
    improved: bool,
) -> AppResult<EmissionResult> {
    let schedule = PlanSchedule::planned(plan, improved)?;
    let scheduled = schedule
        .find(step_id)
        .ok_or(AppError::StepNotFound(step_id))?;
    Ok(compute_step(
        pollutant,
        &planned_context(plan),
        scheduled.step,
        schedule.durations(scheduled),
    )?)
}

pub fn compute_plan_total(
    plan: &WellPlan,
    pollutant: &dyn Pollutant,
    improved: bool,
) -> AppResult<EmissionResult> {
    let schedule = PlanSchedule::planned(plan, improved)?;
    Ok(compute_steps(plan, &schedule, pollutant)?.into_iter().sum())
}

/// Emissions avoided by running the improved schedule instead of the
/// regular one.
pub fn compute_improvement(plan: &WellPlan, pollutant: &dyn Pollutant) -> AppResult<EmissionResult> {
    let regular = compute_plan_total(plan, pollutant, false)?;
    let improved = compute_plan_total(plan, pollutant, true)?;
    Ok(regular.subtracted(&improved))
}

/// `(total, improved)` planned durations in days.
pub fn planned_durations(plan: &WellPlan) -> AppResult<(Real, Real)> {
    let regular = PlanSchedule::planned(plan, false)?;
    let improved = PlanSchedule::planned(plan, true)?;
    Ok((regular.total_duration, improved.total_duration))
}

fn step_points(
    scheduled: &ScheduledStep<'_>,
    points: Vec<(chrono::DateTime<chrono::Utc>, EmissionResult)>,
) -> Vec<StepPoint> {
    points
        .into_iter()
        .map(|(at, emissions)| StepPoint {
            at,
            step: scheduled.step.id,
            emissions,
        })
        .collect()
}

pub fn compute_plan_daily_dataset(
    plan: &WellPlan,
    pollutant: &dyn Pollutant,
    improved: bool,
) -> AppResult<Vec<StepPoint>> {
    info!(plan = %plan.name, pollutant = pollutant.name(), improved, "generating planned daily dataset");
    let schedule = PlanSchedule::planned(plan, improved)?;
    let results = compute_steps(plan, &schedule, pollutant)?;
    let plan_start = plan.planned_start();

    let per_step: Vec<Vec<StepPoint>> = schedule
        .steps
        .par_iter()
        .zip(results.par_iter())
        .map(|(scheduled, result)| -> AppResult<Vec<StepPoint>> {
            let points = spread_daily(result, scheduled.duration, scheduled.offset, plan_start)?;
            Ok(step_points(scheduled, points))
        })
        .collect::<AppResult<_>>()?;
    let dataset: Vec<StepPoint> = per_step.into_iter().flatten().collect();
    info!(plan = %plan.name, points = dataset.len(), "planned daily dataset generated");
    Ok(dataset)
}

pub fn compute_plan_windowed_dataset(
    plan: &WellPlan,
    pollutant: &dyn Pollutant,
    improved: bool,
    window: Window,
) -> AppResult<Vec<StepPoint>> {
    info!(
        plan = %plan.name,
        pollutant = pollutant.name(),
        improved,
        start = %window.start,
        end = %window.end,
        "generating planned hourly dataset"
    );
    let schedule = PlanSchedule::planned(plan, improved)?;
    let results = compute_steps(plan, &schedule, pollutant)?;
    let plan_start = plan.planned_start();

    let per_step: Vec<Vec<StepPoint>> = schedule
        .steps
        .par_iter()
        .zip(results.par_iter())
        .map(|(scheduled, result)| -> AppResult<Vec<StepPoint>> {
            let points = spread_hourly(
                result,
                scheduled.duration,
                scheduled.offset,
                plan_start,
                window,
            )?;
            Ok(step_points(scheduled, points))
        })
        .collect::<AppResult<_>>()?;
    Ok(per_step.into_iter().flatten().collect())
}

/// Baseline and target CO2 of the improved schedule.
pub fn compute_plan_summary(plan: &WellPlan) -> AppResult<PlanSummary> {
    let schedule = PlanSchedule::planned(plan, true)?;
    let results = compute_steps(plan, &schedule, &Co2::new(plan.factors))?;
    let mut summary = PlanSummary {
        total_baseline: 0.0,
        total_target: 0.0,
        total_improved_duration: schedule.total_duration,
    };
    for result in &results {
        summary.total_baseline += result.baseline;
        summary.total_target += result.target;
    }
    Ok(summary)
}

/// CO2 saved by productivity initiatives, laid out after the end of the
/// improved schedule. Empty when nothing is saved.
pub fn compute_saved_co2_dataset(plan: &WellPlan, window: Option<Window>) -> AppResult<Vec<Point>> {
    let (total, improved) = planned_durations(plan)?;
    let saved_duration = total - improved;
    if saved_duration <= 0.0 {
        return Ok(Vec::new());
    }

    let saved = compute_improvement(plan, &Co2::new(plan.factors))?;
    info!(plan = %plan.name, saved_duration, saved_co2 = saved.baseline, "generating saved CO2 dataset");
    let plan_start = plan.planned_start();
    let points = match window {
        Some(window) => spread_hourly(&saved, saved_duration, improved, plan_start, window)?,
        None => spread_daily(&saved, saved_duration, improved, plan_start)?,
    };
    Ok(points
        .into_iter()
        .map(|(at, emissions)| Point { at, emissions })
        .collect())
}
