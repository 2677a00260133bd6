use thiserror::Error;

pub type TimeseriesResult<T> = Result<T, TimeseriesError>;

#[derive(Error, Debug)]
pub enum TimeseriesError {
    #[error("Duration cannot be greater than one day: {duration}")]
    DurationExceedsDay { duration: f64 },

    #[error("Offset of {duration} days is outside the supported calendar range")]
    OutOfRange { duration: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
