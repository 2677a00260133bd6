//! Shared application service layer for the well-plan emissions engine.
//!
//! This crate turns a loaded [`wp_plan::WellPlan`] into per-step results,
//! calendar-aligned datasets and plan summaries, for both the planned and
//! the executed (measured) well.

pub mod dataset;
pub mod error;
pub mod measured_service;
pub mod plan_service;
pub mod project_service;
pub mod totals;

pub use dataset::{MeasuredSummary, MeasurementPoint, PlanSummary, Point, StepPoint};
pub use error::{AppError, AppResult};
pub use measured_service::{
    compute_measured_daily_dataset, compute_measured_summary, compute_measured_windowed_dataset,
    compute_measurement_dataset,
};
pub use plan_service::{
    PollutantKind, compute_improvement, compute_plan_daily_dataset, compute_plan_summary,
    compute_plan_total, compute_plan_windowed_dataset, compute_planned_step,
    compute_saved_co2_dataset, planned_durations,
};
pub use project_service::{PlanOverview, load_plan, plan_overview, validate_plan_file};
pub use totals::{PlanSchedule, ScheduledStep, SeasonDurations};
