//! SAFETY SCORE
//!
//! Weighted composite of six normalised sub-scores (0-100 each):
//!
//! | metric         | normalisation                  | weight |
//! |----------------|--------------------------------|--------|
//! | temperature    | 100 − 2·|t − 22|, floor 0      | 0.15   |
//! | humidity       | 100 − |h − 60|, within [0,100] | 0.10   |
//! | air quality    | 100 − aq/5, floor 0            | 0.25   |
//! | deforestation  | 100 − d, floor 0               | 0.20   |
//! | carbon         | 100 − c/2, floor 0             | 0.18   |
//! | water quality  | w                              | 0.12   |
//!
//! Biodiversity is projected and reported but carries no weight here.
//! A time decay `max(0.7, 1 − 0.008·months)` is applied last.

use crate::snapshot::{Metric, MetricsSnapshot};

pub const IDEAL_TEMPERATURE: f64 = 22.0;
pub const IDEAL_HUMIDITY: f64 = 60.0;

/// Sub-score weights; `None` for metrics outside the composite.
pub fn weight(metric: Metric) -> Option<f64> {
    match metric {
        Metric::Temperature => Some(0.15),
        Metric::Humidity => Some(0.10),
        Metric::AirQuality => Some(0.25),
        Metric::Deforestation => Some(0.20),
        Metric::CarbonEmission => Some(0.18),
        Metric::WaterQuality => Some(0.12),
        Metric::Biodiversity => None,
    }
}

/// Normalised 0-100 sub-score for one metric (higher = safer).
pub fn normalized_sub_score(metric: Metric, value: f64) -> f64 {
    match metric {
        Metric::Temperature => (100.0 - (value - IDEAL_TEMPERATURE).abs() * 2.0).max(0.0),
        Metric::Humidity => (100.0 - (value - IDEAL_HUMIDITY).abs()).clamp(0.0, 100.0),
        Metric::AirQuality => (100.0 - value / 5.0).max(0.0),
        Metric::Deforestation => (100.0 - value).max(0.0),
        Metric::CarbonEmission => (100.0 - value / 2.0).max(0.0),
        Metric::WaterQuality => value,
        Metric::Biodiversity => value,
    }
}

/// Decay multiplier for distant projections.
pub fn time_decay(months_ahead: u32) -> f64 {
    (1.0 - months_ahead as f64 * 0.008).max(0.7)
}

/// Weighted sum before decay.
pub fn weighted_score(metrics: &MetricsSnapshot) -> f64 {
    Metric::ALL
        .iter()
        .filter_map(|&m| weight(m).map(|w| normalized_sub_score(m, metrics.get(m)) * w))
        .sum()
}

/// Safety score for a (projected) snapshot `months_ahead` months out.
pub fn calculate_safety_score(metrics: &MetricsSnapshot, months_ahead: u32) -> f64 {
    weighted_score(metrics) * time_decay(months_ahead)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ideal() -> MetricsSnapshot {
        MetricsSnapshot {
            temperature: 22.0,
            humidity: 60.0,
            air_quality: 0.0,
            deforestation: 0.0,
            carbon_emission: 0.0,
            water_quality: 100.0,
            biodiversity: 0.0,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = Metric::ALL.iter().filter_map(|&m| weight(m)).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ideal_snapshot_scores_100() {
        assert_relative_eq!(calculate_safety_score(&ideal(), 0), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_biodiversity_not_weighted() {
        let mut rich = ideal();
        rich.biodiversity = 100.0;
        assert_relative_eq!(
            calculate_safety_score(&rich, 0),
            calculate_safety_score(&ideal(), 0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_time_decay_floor() {
        assert_relative_eq!(time_decay(0), 1.0);
        assert_relative_eq!(time_decay(10), 0.92, epsilon = 1e-12);
        // 1 − 0.008 × 37.5 = 0.7
        assert_relative_eq!(time_decay(40), 0.7);
        assert_relative_eq!(time_decay(120), 0.7);
    }

    #[test]
    fn test_baseline_snapshot() {
        // temp 25 → 94, humidity 60 → 100, aq 100 → 80, defo 20 → 80,
        // carbon 50 → 75, water 70
        let snapshot = MetricsSnapshot::default();
        let expected = 94.0 * 0.15 + 100.0 * 0.10 + 80.0 * 0.25 + 80.0 * 0.20 + 75.0 * 0.18 + 70.0 * 0.12;
        assert_relative_eq!(calculate_safety_score(&snapshot, 0), expected, epsilon = 1e-9);
        assert_relative_eq!(calculate_safety_score(&snapshot, 5), expected * 0.96, epsilon = 1e-9);
    }

    #[test]
    fn test_sub_scores_floor() {
        assert_eq!(normalized_sub_score(Metric::Temperature, 80.0), 0.0);
        assert_eq!(normalized_sub_score(Metric::AirQuality, 900.0), 0.0);
        assert_eq!(normalized_sub_score(Metric::Humidity, 200.0), 0.0);
        assert_eq!(normalized_sub_score(Metric::CarbonEmission, 250.0), 0.0);
    }
}
