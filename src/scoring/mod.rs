//! Scoring modules for projected snapshots
//!
//! - `safety_score`: weighted composite with time decay
//! - `risk`: threshold risk factors and urgency buckets
//! - `climate_impact`: heat/carbon/deforestation impact score
//!
//! The small per-month indicators (confidence, volatility, trend strength)
//! live here directly.

pub mod climate_impact;
pub mod risk;
pub mod safety_score;

pub use climate_impact::{assess_climate_impact, ClimateImpact, ImpactSeverity};
pub use risk::{identify_risk_factors, intervention_urgency, overall_risk_level, RiskLevel};
pub use safety_score::{calculate_safety_score, time_decay};

use crate::snapshot::{Metric, MetricsSnapshot};

/// Lowest confidence ever reported
pub const CONFIDENCE_FLOOR: f64 = 0.3;

/// Model confidence for a month offset: `max(0.3, 0.92 − 0.04·months)`.
pub fn confidence(months_ahead: u32) -> f64 {
    (0.92 - months_ahead as f64 * 0.04).max(CONFIDENCE_FLOOR)
}

/// Volatility grows with distance: `min(1, 0.1 + 0.03·months)`.
pub fn volatility_index(months_ahead: u32) -> f64 {
    (0.1 + months_ahead as f64 * 0.03).min(1.0)
}

/// Mean relative change across all seven metrics.
///
/// A zero current value is divided by 1 instead.
pub fn trend_strength(projected: &MetricsSnapshot, current: &MetricsSnapshot) -> f64 {
    let total: f64 = Metric::ALL
        .iter()
        .map(|&m| {
            let now = current.get(m);
            let denominator = if now == 0.0 { 1.0 } else { now.abs() };
            (projected.get(m) - now).abs() / denominator
        })
        .sum();
    total / Metric::ALL.len() as f64
}
