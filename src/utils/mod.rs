//! Utility modules shared across the forecasting pipeline
//!
//! - `stats`: rounding, mean, standard deviation, least-squares fit
//! - `dates`: month offsets for series dates

pub mod dates;
pub mod stats;

pub use dates::{month_index, month_start};
pub use stats::{linear_fit, mean, population_std_dev, round_to, LinearFit};
