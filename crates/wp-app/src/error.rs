//! Error types for the wp-app service layer.

use std::path::PathBuf;

use wp_core::StepId;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Plan error: {0}")]
    Plan(String),

    #[error("Failed to read plan file: {path}")]
    PlanFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Time series error: {0}")]
    Timeseries(String),

    #[error("Step not found: {0}")]
    StepNotFound(StepId),

    #[error("Plan {0} is missing an actual start date")]
    MissingActualStartDate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for wp-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<wp_plan::PlanError> for AppError {
    fn from(err: wp_plan::PlanError) -> Self {
        AppError::Plan(err.to_string())
    }
}

impl From<wp_emissions::EmissionError> for AppError {
    fn from(err: wp_emissions::EmissionError) -> Self {
        AppError::Calculation(err.to_string())
    }
}

impl From<wp_timeseries::TimeseriesError> for AppError {
    fn from(err: wp_timeseries::TimeseriesError) -> Self {
        AppError::Timeseries(err.to_string())
    }
}
