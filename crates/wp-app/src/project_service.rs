//! Plan loading, validation, and introspection.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};
use wp_plan::WellPlan;

use crate::error::{AppError, AppResult};

/// Short description of a loaded plan for listings.
#[derive(Debug, Clone, Serialize)]
pub struct PlanOverview {
    pub name: String,
    pub planned_steps: usize,
    pub complete_steps: usize,
    pub initiatives: usize,
    pub telemetry_samples: usize,
    pub has_actual_start: bool,
}

/// Load a plan file. JSON when the extension says so, YAML otherwise.
pub fn load_plan(path: &Path) -> AppResult<WellPlan> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::PlanFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let plan = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => wp_plan::from_json_str(&content)?,
        _ => wp_plan::from_yaml_str(&content)?,
    };
    info!(plan = %plan.name, path = %path.display(), "plan loaded");
    Ok(plan)
}

/// Load and validate a plan file, returning its overview.
pub fn validate_plan_file(path: &Path) -> AppResult<PlanOverview> {
    let plan = load_plan(path)?;
    debug!(plan = %plan.name, "plan is valid");
    Ok(plan_overview(&plan))
}

pub fn plan_overview(plan: &WellPlan) -> PlanOverview {
    PlanOverview {
        name: plan.name.clone(),
        planned_steps: plan.planned.steps.len(),
        complete_steps: plan.complete.steps.len(),
        initiatives: plan.catalog.initiatives.iter().filter(|i| !i.deleted).count(),
        telemetry_samples: plan.telemetry.len(),
        has_actual_start: plan.actual_start_date.is_some(),
    }
}
