//! Trend projector
//!
//! Extrapolates a metric forward month by month:
//!
//! ```text
//! trend    = base_trend × country_factor × months_ahead
//! seasonal = sin(months_ahead / 12 × 2π) × |current| × 0.05
//! noise    = (u − 0.5) × |current| × 0.02,   u ~ U[0, 1)
//! result   = max(0, current + trend + seasonal + noise)
//! ```
//!
//! Non-finite inputs are not guarded and propagate into the result.

use rand::Rng;
use std::f64::consts::PI;

use crate::country::CountryFactor;
use crate::snapshot::{Metric, MetricsSnapshot};

/// Relative amplitude of the yearly seasonal swing
pub const SEASONAL_AMPLITUDE: f64 = 0.05;
/// Relative width of the uniform noise band
pub const NOISE_AMPLITUDE: f64 = 0.02;

/// Per-month drift before the country multiplier is applied.
pub fn base_trend(metric: Metric) -> f64 {
    match metric {
        Metric::Temperature => 0.02,
        Metric::Humidity => 0.1,
        Metric::AirQuality => 0.5,
        Metric::Deforestation => 0.1,
        Metric::CarbonEmission => 0.3,
        Metric::WaterQuality => -0.2,
        Metric::Biodiversity => -0.15,
    }
}

/// The three additive components of one projection step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionTerms {
    pub trend: f64,
    pub seasonal: f64,
    pub noise: f64,
}

impl ProjectionTerms {
    /// `noise_draw` is a sample from U[0, 1); 0.5 yields zero noise.
    pub fn compute(
        current: f64,
        months_ahead: u32,
        country_factor: f64,
        base_trend: f64,
        noise_draw: f64,
    ) -> Self {
        let months = months_ahead as f64;
        Self {
            trend: base_trend * country_factor * months,
            seasonal: (months / 12.0 * 2.0 * PI).sin() * current.abs() * SEASONAL_AMPLITUDE,
            noise: (noise_draw - 0.5) * current.abs() * NOISE_AMPLITUDE,
        }
    }

    /// Apply the terms to `current`, floored at 0.
    pub fn apply(&self, current: f64) -> f64 {
        let predicted = current + self.trend + self.seasonal + self.noise;
        // `max` would turn NaN into 0
        if predicted.is_nan() {
            predicted
        } else {
            predicted.max(0.0)
        }
    }
}

/// Project a single value `months_ahead` months into the future.
pub fn apply_prediction_trend<R: Rng + ?Sized>(
    current: f64,
    months_ahead: u32,
    country_factor: f64,
    base_trend: f64,
    rng: &mut R,
) -> f64 {
    let draw: f64 = rng.gen();
    ProjectionTerms::compute(current, months_ahead, country_factor, base_trend, draw).apply(current)
}

/// Project every metric of a snapshot and clamp the percentage fields.
pub fn project_snapshot<R: Rng + ?Sized>(
    current: &MetricsSnapshot,
    months_ahead: u32,
    factor: &CountryFactor,
    rng: &mut R,
) -> MetricsSnapshot {
    let mut projected = *current;
    for metric in Metric::ALL {
        let value = apply_prediction_trend(
            current.get(metric),
            months_ahead,
            factor.for_metric(metric),
            base_trend(metric),
            rng,
        );
        projected.set(metric, value);
    }
    projected.clamped()
}
