//! Error types for the forecasting library.
//!
//! HTTP mapping lives in `api_server::AppError`; this enum only covers
//! failures the pure computations can report.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ForecastError {
    #[error("prediction horizon must be between 1 and {max} months, got {got}")]
    InvalidHorizon { got: i64, max: u32 },

    #[error("time range must be between 1 and {max} months, got {got}")]
    InvalidTimeRange { got: i64, max: u32 },

    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    #[error("cannot analyse an empty series")]
    EmptySeries,

    #[error("date arithmetic overflowed for offset of {0} months")]
    DateOutOfRange(i64),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
