//! Environmental projection & safety scoring
//!
//! One shared implementation of the regional forecast pipeline:
//! - `snapshot`: the seven tracked metrics and request-side defaults
//! - `country`: per-country trend multipliers and lookup tables
//! - `projection`: trend + seasonal + noise extrapolation
//! - `scoring/`: safety score, risk factors, urgency, climate impact
//! - `predictor`: month-by-month prediction series with summary analysis
//! - `time_series`: historical/forecast series and their trend analyses
//! - `alerts`: per-country safety alert feed
//! - `api_server`: Axum JSON endpoints (feature `api`)

pub mod alerts;
pub mod config;
pub mod country;
pub mod error;
pub mod predictor;
pub mod projection;
pub mod scoring;
pub mod snapshot;
pub mod time_series;
pub mod utils;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::ServerConfig;
pub use country::{country_factor, CountryFactor};
pub use error::ForecastError;
pub use predictor::{EnvironmentalPredictor, ForecastRequest, Prediction, PredictionSeries};
pub use projection::{apply_prediction_trend, project_snapshot, ProjectionTerms};
pub use scoring::{calculate_safety_score, confidence, intervention_urgency, RiskLevel};
pub use snapshot::{EnvironmentalInput, Metric, MetricsSnapshot};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
