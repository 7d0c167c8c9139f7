//! Climate impact classification for a projected month.

use serde::{Deserialize, Serialize};

use crate::snapshot::MetricsSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateImpact {
    /// 0-1
    pub score: f64,
    pub severity: ImpactSeverity,
    pub time_horizon: u32,
}

/// Heat, carbon and deforestation contributions, capped at 1.
///
/// Severity is judged on the uncapped sum.
pub fn assess_climate_impact(metrics: &MetricsSnapshot, months_ahead: u32) -> ClimateImpact {
    let mut impact = 0.0;

    if metrics.temperature > 30.0 {
        impact += 0.3;
    }
    if metrics.temperature > 35.0 {
        impact += 0.2;
    }
    impact += (metrics.carbon_emission / 200.0).min(0.3);
    impact += (metrics.deforestation / 100.0).min(0.2);

    let severity = if impact > 0.7 {
        ImpactSeverity::High
    } else if impact > 0.4 {
        ImpactSeverity::Medium
    } else {
        ImpactSeverity::Low
    };

    ClimateImpact {
        score: impact.min(1.0),
        severity,
        time_horizon: months_ahead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_baseline_contributions() {
        // 50/200 = 0.25, 20/100 = 0.2
        let impact = assess_climate_impact(&MetricsSnapshot::default(), 3);
        assert_relative_eq!(impact.score, 0.45, epsilon = 1e-12);
        assert_eq!(impact.severity, ImpactSeverity::Medium);
        assert_eq!(impact.time_horizon, 3);
    }

    #[test]
    fn test_extreme_heat_saturates() {
        let snapshot = MetricsSnapshot {
            temperature: 40.0,
            carbon_emission: 300.0,
            deforestation: 80.0,
            ..MetricsSnapshot::default()
        };
        let impact = assess_climate_impact(&snapshot, 1);
        assert_relative_eq!(impact.score, 1.0);
        assert_eq!(impact.severity, ImpactSeverity::High);
    }

    #[test]
    fn test_clean_air_is_low() {
        let snapshot = MetricsSnapshot {
            temperature: 20.0,
            carbon_emission: 10.0,
            deforestation: 5.0,
            ..MetricsSnapshot::default()
        };
        assert_eq!(assess_climate_impact(&snapshot, 1).severity, ImpactSeverity::Low);
    }
}
