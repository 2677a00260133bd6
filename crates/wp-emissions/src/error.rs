use thiserror::Error;
use wp_core::{CoreError, Id, ModeId, PhaseId};

use crate::model::Season;

pub type CalcResult<T> = Result<T, EmissionError>;

#[derive(Error, Debug)]
pub enum EmissionError {
    #[error("No baseline input for phase {phase}, mode {mode}, season {season:?}")]
    MissingBaselineInput {
        phase: PhaseId,
        mode: ModeId,
        season: Season,
    },

    #[error("Missing {what} with id {id}")]
    MissingCoefficient { what: &'static str, id: Id },

    #[error("Measurement window of {window} days exceeds step duration of {duration} days")]
    WindowExceedsStep { window: f64, duration: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}
