//! Risk classification
//!
//! Threshold checks per metric, and the bucketing of a safety score plus
//! active-factor count into a qualitative level.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::snapshot::MetricsSnapshot;

/// Qualitative risk level, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const EXTREME_HEAT: &str = "Extreme heat conditions predicted";
pub const HAZARDOUS_AIR: &str = "Hazardous air quality levels";
pub const SEVERE_DEFORESTATION: &str = "Severe deforestation risk";
pub const CRITICAL_WATER: &str = "Critical water quality degradation";
pub const EXCESSIVE_CARBON: &str = "Excessive carbon emissions";
pub const BIODIVERSITY_COLLAPSE: &str = "Biodiversity collapse risk";

/// Independent per-metric threshold checks, in fixed order.
pub fn identify_risk_factors(metrics: &MetricsSnapshot) -> Vec<String> {
    let checks = [
        (metrics.temperature > 35.0, EXTREME_HEAT),
        (metrics.air_quality > 200.0, HAZARDOUS_AIR),
        (metrics.deforestation > 40.0, SEVERE_DEFORESTATION),
        (metrics.water_quality < 30.0, CRITICAL_WATER),
        (metrics.carbon_emission > 100.0, EXCESSIVE_CARBON),
        (metrics.biodiversity < 30.0, BIODIVERSITY_COLLAPSE),
    ];

    checks
        .into_iter()
        .filter(|(triggered, _)| *triggered)
        .map(|(_, label)| label.to_string())
        .collect()
}

/// How urgently a projected month needs intervention.
pub fn intervention_urgency(safety_score: f64, risk_factor_count: usize) -> RiskLevel {
    if safety_score < 40.0 || risk_factor_count > 3 {
        RiskLevel::Critical
    } else if safety_score < 60.0 || risk_factor_count > 2 {
        RiskLevel::High
    } else if safety_score < 80.0 || risk_factor_count > 1 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Level for a whole prediction series from its worst and average score.
pub fn overall_risk_level(minimum_score: f64, average_score: f64) -> RiskLevel {
    if minimum_score < 30.0 {
        RiskLevel::Critical
    } else if minimum_score < 50.0 {
        RiskLevel::High
    } else if average_score < 70.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
