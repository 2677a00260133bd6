//! wp-plan: well-plan document format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_plan};

pub type PlanResult<T> = Result<T, PlanError>;

#[derive(thiserror::Error, Debug)]
pub enum PlanError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> PlanResult<WellPlan> {
    let mut plan: WellPlan = serde_yaml::from_str(content)?;
    plan = migrate_to_latest(plan)?;
    validate_plan(&plan)?;
    Ok(plan)
}

pub fn load_yaml(path: &std::path::Path) -> PlanResult<WellPlan> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, plan: &WellPlan) -> PlanResult<()> {
    validate_plan(plan)?;
    let content = serde_yaml::to_string(plan)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn from_json_str(content: &str) -> PlanResult<WellPlan> {
    let mut plan: WellPlan = serde_json::from_str(content)?;
    plan = migrate_to_latest(plan)?;
    validate_plan(&plan)?;
    Ok(plan)
}

pub fn load_json(path: &std::path::Path) -> PlanResult<WellPlan> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

pub fn save_json(path: &std::path::Path, plan: &WellPlan) -> PlanResult<()> {
    validate_plan(plan)?;
    let content = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a plan, picking the format from the file extension (YAML unless
/// the extension is `json`).
pub fn load(path: &std::path::Path) -> PlanResult<WellPlan> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
