//! wp-emissions: CO2/NOx calculation for well-plan steps.
//!
//! Layers, leaf first:
//! - unit: stateless fuel/emission formulas
//! - reduction: reduction-initiative percentages applied to a base figure
//! - step: per-step aggregation of every emission source
//! - measured: reconciliation of executed steps against telemetry
//!
//! Pollutant-specific arithmetic lives behind the [`Pollutant`] trait so
//! CO2 and NOx share one aggregation pipeline.

pub mod error;
pub mod factors;
pub mod measured;
pub mod model;
pub mod pollutant;
pub mod reduction;
pub mod result;
pub mod step;
pub mod unit;

pub use error::{CalcResult, EmissionError};
pub use factors::EmissionFactors;
pub use measured::{
    MeasuredTotals, SampleSeries, SensorSample, Telemetry, compute_measured_step_co2,
    elapsed_days, measured_base,
};
pub use model::*;
pub use pollutant::{Co2, Nox, Pollutant};
pub use reduction::InitiativeReduction;
pub use result::EmissionResult;
pub use step::{StepContext, StepDurations, compute_step, compute_step_co2, compute_step_nox};
