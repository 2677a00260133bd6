//! Reconciliation of executed steps against rig telemetry.
//!
//! Once a well is being drilled the rig CO2 is measured, not modelled. The
//! pre-reduction base is recovered by inverting the reduction percentages,
//! and every other source is evaluated over the measured window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wp_core::{ROUNDING_ERROR, Real, ensure_finite, in_days, prorate, s};

use crate::error::{CalcResult, EmissionError};
use crate::factors::EmissionFactors;
use crate::model::StepInput;
use crate::pollutant::Co2;
use crate::reduction;
use crate::result::EmissionResult;
use crate::step::{self, StepContext, StepDurations};

/// Source of measured rig CO2.
pub trait Telemetry {
    /// Sum of the samples taken in `[start, end)`.
    fn sum(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Real;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub at: DateTime<Utc>,
    pub value: Real,
}

/// In-memory telemetry, kept sorted by timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSeries {
    samples: Vec<SensorSample>,
}

impl SampleSeries {
    pub fn new(mut samples: Vec<SensorSample>) -> Self {
        samples.sort_by_key(|sample| sample.at);
        Self { samples }
    }

    pub fn samples(&self) -> &[SensorSample] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples taken in `[start, end)`.
    pub fn range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> &[SensorSample] {
        let lo = self.samples.partition_point(|sample| sample.at < start);
        let hi = self.samples.partition_point(|sample| sample.at < end);
        if lo >= hi {
            &[]
        } else {
            &self.samples[lo..hi]
        }
    }
}

impl Telemetry for SampleSeries {
    fn sum(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Real {
        self.range(start, end).iter().map(|sample| sample.value).sum()
    }
}

/// Base emissions that, reduced by `total_percent`, give `rig`.
///
/// Reductions of 100% or more leave nothing to invert and yield zero.
pub fn measured_base(rig: Real, total_percent: Real) -> Real {
    let fraction = total_percent / 100.0;
    if fraction >= 1.0 {
        0.0
    } else {
        rig / (1.0 - fraction)
    }
}

/// Totals of the executed plan used to prorate vessels and helicopters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredTotals {
    pub total_duration: Real,
    pub total_season_duration: Real,
}

/// Elapsed time between two instants, in days.
pub fn elapsed_days(start: DateTime<Utc>, end: DateTime<Utc>) -> Real {
    let (from, to) = if end >= start {
        (start, end)
    } else {
        (end, start)
    };
    let delta = to - from;
    let seconds = delta.num_seconds() as Real + Real::from(delta.subsec_nanos()) / 1e9;
    in_days(s(seconds))
}

/// CO2 of the part of an executed step that falls in `[start, end)`.
pub fn compute_measured_step_co2<T: Telemetry + ?Sized>(
    ctx: &StepContext<'_>,
    factors: EmissionFactors,
    step: &StepInput,
    telemetry: &T,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    totals: MeasuredTotals,
) -> CalcResult<EmissionResult> {
    let window = elapsed_days(start, end);
    if window > step.duration && (window - step.duration).abs() > ROUNDING_ERROR {
        warn!(step = %step.id, window, duration = step.duration, "window exceeds step");
        return Err(EmissionError::WindowExceedsStep {
            window,
            duration: step.duration,
        });
    }

    let rig = ensure_finite(telemetry.sum(start, end), "measured rig emissions")?;
    let percentages = reduction::emission_percentages(step, ctx.catalog)?;
    let total_percent: Real = percentages.iter().map(|(_, p)| p).sum();
    let base = measured_base(rig, total_percent);

    let pollutant = Co2::new(factors);
    let mut sources = step::sources(
        &pollutant,
        ctx,
        step,
        StepDurations {
            duration: window,
            total_duration: totals.total_duration,
            total_season_duration: totals.total_season_duration,
        },
    )?;
    sources.cement = prorate(sources.cement, window, step.duration);
    sources.steel = prorate(sources.steel, window, step.duration);
    // measured rig figures already reflect any displaced generator fuel
    sources.external_energy_supply_reduction = 0.0;

    let reductions = reduction::apply(base, &percentages);
    let result = step::assemble(base, rig, sources, reductions);
    debug!(
        step = %step.id,
        window,
        rig,
        base,
        "reconciled measured step"
    );
    Ok(result)
}
