// Property sweeps over the forecast pipeline
//
// Seeded RNGs keep these reproducible while still covering the noise band.

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use envsafety_forecast::country::{country_factor, CountryFactor};
use envsafety_forecast::projection::{base_trend, ProjectionTerms};
use envsafety_forecast::scoring::CONFIDENCE_FLOOR;
use envsafety_forecast::{
    apply_prediction_trend, calculate_safety_score, confidence, intervention_urgency,
    project_snapshot, EnvironmentalPredictor, ForecastRequest, Metric, MetricsSnapshot, RiskLevel,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_snapshot(rng: &mut StdRng) -> MetricsSnapshot {
    MetricsSnapshot {
        temperature: rng.gen_range(0.0..50.0),
        humidity: rng.gen_range(0.0..100.0),
        air_quality: rng.gen_range(0.0..500.0),
        deforestation: rng.gen_range(0.0..100.0),
        carbon_emission: rng.gen_range(0.0..300.0),
        water_quality: rng.gen_range(0.0..100.0),
        biodiversity: rng.gen_range(0.0..100.0),
    }
}

#[test]
fn projected_values_never_negative() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..500 {
        let current: f64 = rng.gen_range(0.0..400.0);
        let months: u32 = rng.gen_range(0..=120);
        let factor: f64 = rng.gen_range(-5.0..5.0);
        let trend: f64 = rng.gen_range(-2.0..2.0);
        let value = apply_prediction_trend(current, months, factor, trend, &mut rng);
        assert!(value >= 0.0, "current {} months {} factor {} trend {}", current, months, factor, trend);
    }
}

#[test]
fn projected_snapshots_respect_bounds() {
    let mut rng = StdRng::seed_from_u64(99);
    for code in ["BD", "US", "BR", "IN", "FR"] {
        let factor = country_factor(code);
        for _ in 0..50 {
            let current = random_snapshot(&mut rng);
            for month in 0..=36 {
                let projected = project_snapshot(&current, month, &factor, &mut rng);
                for metric in Metric::ALL {
                    let v = projected.get(metric);
                    assert!(v >= 0.0);
                    if metric.is_percentage() {
                        assert!(v <= 100.0);
                    }
                }
            }
        }
    }
}

#[test]
fn worked_example_temperature_step() {
    // applyPredictionTrend(25, 1, 1.2, 0.02) with seasonal and noise removed
    let terms = ProjectionTerms::compute(25.0, 1, 1.2, 0.02, 0.5);
    assert_relative_eq!(25.0 + terms.trend, 25.024, epsilon = 1e-12);
    assert!(terms.seasonal.abs() <= 25.0 * 0.05);

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let v = apply_prediction_trend(25.0, 1, 1.2, base_trend(Metric::Temperature), &mut rng);
        assert!((v - 25.024).abs() <= 25.0 * 0.05 + 25.0 * 0.02);
    }
}

#[test]
fn ideal_conditions_score_full_marks() {
    let ideal = MetricsSnapshot {
        temperature: 22.0,
        humidity: 60.0,
        air_quality: 0.0,
        deforestation: 0.0,
        carbon_emission: 0.0,
        water_quality: 100.0,
        biodiversity: 50.0,
    };
    assert_relative_eq!(calculate_safety_score(&ideal, 0), 100.0, epsilon = 1e-9);
}

#[test]
fn scores_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let snapshot = random_snapshot(&mut rng);
        let months = rng.gen_range(0..=60);
        let score = calculate_safety_score(&snapshot, months);
        assert!((0.0..=100.0).contains(&score));
    }
}

#[test]
fn confidence_non_increasing_with_floor() {
    let mut previous = f64::INFINITY;
    for month in 0..=200 {
        let c = confidence(month);
        assert!(c <= previous);
        assert!(c >= CONFIDENCE_FLOOR);
        previous = c;
    }
}

#[test]
fn urgency_monotone_in_both_arguments() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..2000 {
        let score: f64 = rng.gen_range(0.0..100.0);
        let lower: f64 = score - rng.gen_range(0.0..score.max(f64::EPSILON));
        let count: usize = rng.gen_range(0..6);
        let level = intervention_urgency(score, count);

        assert!(intervention_urgency(lower, count) >= level);
        assert!(intervention_urgency(score, count + 1) >= level);
    }
    assert_eq!(intervention_urgency(100.0, 0), RiskLevel::Low);
}

#[test]
fn unknown_country_is_neutral() {
    for code in ["XX", "FR", "jp", "", "USA"] {
        assert_eq!(country_factor(code), CountryFactor::NEUTRAL);
    }
}

#[test]
fn series_is_fresh_each_call() {
    let predictor = EnvironmentalPredictor::default();
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
    let request = ForecastRequest {
        current: MetricsSnapshot::default(),
        country_code: "IN",
        prediction_type: "comprehensive",
        timeframe: 24,
    };

    let mut rng = StdRng::seed_from_u64(31);
    let first = predictor.predict(&request, now, &mut rng).unwrap();
    let second = predictor.predict(&request, now, &mut rng).unwrap();

    assert_eq!(first.predictions.len(), 24);
    assert_eq!(second.predictions.len(), 24);
    assert_ne!(first.predictions[5].metrics, second.predictions[5].metrics);

    for pair in first.predictions.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
        assert!(pair[0].date < pair[1].date);
    }
}
