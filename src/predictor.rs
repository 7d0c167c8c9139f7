//! Environmental Predictor - builds prediction series for a region
//!
//! Ties the projector, the scorers and the risk classifier together: for each
//! month 1..=N the current snapshot is projected forward, scored and
//! classified, then the whole series is summarised.
//!
//! Every call re-draws the projection noise; nothing is cached.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::country::{country_factor, country_risk_factors, normalize_code, CountryFactor};
use crate::error::{ForecastError, Result};
use crate::projection::project_snapshot;
use crate::scoring::{
    assess_climate_impact, calculate_safety_score, confidence, identify_risk_factors,
    intervention_urgency, overall_risk_level, trend_strength, volatility_index, ClimateImpact,
    RiskLevel,
};
use crate::snapshot::MetricsSnapshot;
use crate::utils::{mean, month_start, population_std_dev, round_to};

pub const DEFAULT_TIMEFRAME: i64 = 12;
pub const DEFAULT_MAX_HORIZON: u32 = 60;
pub const DEFAULT_PREDICTION_TYPE: &str = "comprehensive";

/// Fixed headline confidence reported alongside the per-month values
pub const MODEL_CONFIDENCE: f64 = 0.87;
pub const MODEL_VERSION: &str = "Environmental AI v1.0";

/// Scores below this mark a month as a critical period
const CRITICAL_PERIOD_SCORE: f64 = 50.0;
/// Change in points between first and last month that counts as a trend
const TREND_BAND: f64 = 5.0;

/// One projected month
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub date: NaiveDate,
    pub month_ahead: u32,
    pub metrics: MetricsSnapshot,
    /// 0-100, one decimal
    pub safety_score: f64,
    /// Two decimals, never below 0.3
    pub confidence: f64,
    pub risk_factors: Vec<String>,
    pub climate_impact: ClimateImpact,
    pub ai_analysis: MonthAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthAnalysis {
    pub trend_strength: f64,
    pub volatility_index: f64,
    pub intervention_urgency: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Deteriorating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPeriod {
    pub month: u32,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub overall_trend: TrendDirection,
    pub score_change: f64,
    pub volatility: f64,
    pub critical_periods: Vec<CriticalPeriod>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyAssessment {
    pub average_safety_score: f64,
    pub minimum_safety_score: f64,
    pub risk_level: RiskLevel,
    pub country_specific_factors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesAnalysis {
    pub trend_analysis: TrendAnalysis,
    pub safety_assessment: SafetyAssessment,
    pub model_confidence: f64,
    pub prediction_horizon: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMetadata {
    pub country_code: String,
    pub prediction_type: String,
    pub model_version: String,
    pub data_source: String,
    pub algorithm_type: String,
}

/// Full response payload for one prediction request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionSeries {
    pub predictions: Vec<Prediction>,
    pub analysis: SeriesAnalysis,
    pub metadata: SeriesMetadata,
}

/// Inputs for one series
#[derive(Debug, Clone)]
pub struct ForecastRequest<'a> {
    pub current: MetricsSnapshot,
    pub country_code: &'a str,
    pub prediction_type: &'a str,
    pub timeframe: i64,
}

/// Main predictor
#[derive(Debug, Clone)]
pub struct EnvironmentalPredictor {
    max_horizon_months: u32,
}

impl Default for EnvironmentalPredictor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HORIZON)
    }
}

impl EnvironmentalPredictor {
    pub fn new(max_horizon_months: u32) -> Self {
        Self {
            max_horizon_months: max_horizon_months.max(1),
        }
    }

    pub fn max_horizon_months(&self) -> u32 {
        self.max_horizon_months
    }

    /// Check a requested horizon against `1..=max_horizon_months`.
    pub fn validate_horizon(&self, timeframe: i64) -> Result<u32> {
        if timeframe < 1 || timeframe > self.max_horizon_months as i64 {
            return Err(ForecastError::InvalidHorizon {
                got: timeframe,
                max: self.max_horizon_months,
            });
        }
        Ok(timeframe as u32)
    }

    /// Project, score and summarise months 1..=timeframe.
    pub fn predict<R: Rng + ?Sized>(
        &self,
        request: &ForecastRequest<'_>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<PredictionSeries> {
        let horizon = self.validate_horizon(request.timeframe)?;
        let code = normalize_code(request.country_code);
        let factor = country_factor(&code);
        let today = now.date_naive();

        tracing::debug!(country = %code, horizon, "Generating prediction series");

        let predictions = (1..=horizon)
            .map(|month| -> Result<Prediction> {
                let date = month_start(today, month as i64)?;
                Ok(predict_month(&request.current, month, date, &factor, rng))
            })
            .collect::<Result<Vec<_>>>()?;

        let trend_analysis = analyze_series_trend(&predictions)?;
        let safety_assessment = assess_overall_safety(&predictions, &code)?;

        Ok(PredictionSeries {
            predictions,
            analysis: SeriesAnalysis {
                trend_analysis,
                safety_assessment,
                model_confidence: MODEL_CONFIDENCE,
                prediction_horizon: format!("{} months", horizon),
                last_updated: now,
            },
            metadata: SeriesMetadata {
                country_code: code,
                prediction_type: request.prediction_type.to_string(),
                model_version: MODEL_VERSION.to_string(),
                data_source: "NASA Satellite Integration".to_string(),
                algorithm_type: "Multi-factor Environmental Prediction".to_string(),
            },
        })
    }
}

/// Project and classify a single month.
pub fn predict_month<R: Rng + ?Sized>(
    current: &MetricsSnapshot,
    month: u32,
    date: NaiveDate,
    factor: &CountryFactor,
    rng: &mut R,
) -> Prediction {
    let metrics = project_snapshot(current, month, factor, rng);
    let score = calculate_safety_score(&metrics, month);
    let risk_factors = identify_risk_factors(&metrics);
    let urgency = intervention_urgency(score, risk_factors.len());

    Prediction {
        date,
        month_ahead: month,
        metrics,
        safety_score: round_to(score, 1),
        confidence: round_to(confidence(month), 2),
        risk_factors,
        climate_impact: assess_climate_impact(&metrics, month),
        ai_analysis: MonthAnalysis {
            trend_strength: trend_strength(&metrics, current),
            volatility_index: volatility_index(month),
            intervention_urgency: urgency,
        },
    }
}

/// First-vs-last movement, spread and critical months of a series.
pub fn analyze_series_trend(predictions: &[Prediction]) -> Result<TrendAnalysis> {
    let scores: Vec<f64> = predictions.iter().map(|p| p.safety_score).collect();
    let (first, last) = match (scores.first(), scores.last()) {
        (Some(&f), Some(&l)) => (f, l),
        _ => return Err(ForecastError::EmptySeries),
    };

    let overall_trend = if last > first + TREND_BAND {
        TrendDirection::Improving
    } else if last < first - TREND_BAND {
        TrendDirection::Deteriorating
    } else {
        TrendDirection::Stable
    };

    let critical_periods = predictions
        .iter()
        .filter(|p| p.safety_score < CRITICAL_PERIOD_SCORE)
        .map(|p| CriticalPeriod {
            month: p.month_ahead,
            score: p.safety_score,
        })
        .collect();

    Ok(TrendAnalysis {
        overall_trend,
        score_change: last - first,
        volatility: population_std_dev(&scores),
        critical_periods,
    })
}

pub fn assess_overall_safety(predictions: &[Prediction], country_code: &str) -> Result<SafetyAssessment> {
    let scores: Vec<f64> = predictions.iter().map(|p| p.safety_score).collect();
    let average = mean(&scores).ok_or(ForecastError::EmptySeries)?;
    let minimum = scores.iter().copied().fold(f64::INFINITY, f64::min);

    Ok(SafetyAssessment {
        average_safety_score: round_to(average, 1),
        minimum_safety_score: minimum,
        risk_level: overall_risk_level(minimum, average),
        country_specific_factors: country_risk_factors(country_code),
    })
}

/// Stand-in baseline when no readings are supplied.
///
/// Values are uniform draws over plausible ranges; Bangladesh runs 5 °C hotter.
pub fn simulate_baseline<R: Rng + ?Sized>(country_code: &str, rng: &mut R) -> MetricsSnapshot {
    let heat_offset = if normalize_code(country_code) == "BD" { 5.0 } else { 0.0 };
    MetricsSnapshot {
        temperature: 22.0 + rng.gen::<f64>() * 15.0 + heat_offset,
        humidity: 40.0 + rng.gen::<f64>() * 40.0,
        air_quality: 50.0 + rng.gen::<f64>() * 100.0,
        deforestation: rng.gen::<f64>() * 30.0,
        carbon_emission: 20.0 + rng.gen::<f64>() * 80.0,
        water_quality: 30.0 + rng.gen::<f64>() * 70.0,
        biodiversity: 40.0 + rng.gen::<f64>() * 60.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn request(timeframe: i64) -> ForecastRequest<'static> {
        ForecastRequest {
            current: MetricsSnapshot::default(),
            country_code: "bd",
            prediction_type: DEFAULT_PREDICTION_TYPE,
            timeframe,
        }
    }

    #[test]
    fn test_series_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let series = EnvironmentalPredictor::default()
            .predict(&request(12), now(), &mut rng)
            .unwrap();

        assert_eq!(series.predictions.len(), 12);
        for (i, p) in series.predictions.iter().enumerate() {
            assert_eq!(p.month_ahead, i as u32 + 1);
            assert!((0.0..=100.0).contains(&p.safety_score));
            assert!(p.confidence >= 0.3);
        }
        assert_eq!(series.predictions[0].date, NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
        assert_eq!(series.predictions[11].date, NaiveDate::from_ymd_opt(2027, 10, 1).unwrap());
        assert_eq!(series.analysis.prediction_horizon, "12 months");
        assert_eq!(series.metadata.country_code, "BD");
        assert_eq!(series.analysis.safety_assessment.country_specific_factors.len(), 3);
    }

    #[test]
    fn test_horizon_validation() {
        let predictor = EnvironmentalPredictor::new(24);
        assert_eq!(predictor.validate_horizon(24), Ok(24));
        assert_eq!(
            predictor.validate_horizon(0),
            Err(ForecastError::InvalidHorizon { got: 0, max: 24 })
        );
        assert!(predictor.validate_horizon(25).is_err());
        assert!(predictor.validate_horizon(-3).is_err());

        let mut rng = StdRng::seed_from_u64(1);
        assert!(predictor.predict(&request(0), now(), &mut rng).is_err());
    }

    #[test]
    fn test_noise_redrawn_per_call() {
        let predictor = EnvironmentalPredictor::default();
        let mut rng = StdRng::seed_from_u64(3);
        let a = predictor.predict(&request(6), now(), &mut rng).unwrap();
        let b = predictor.predict(&request(6), now(), &mut rng).unwrap();
        assert_ne!(a.predictions[0].metrics, b.predictions[0].metrics);
    }

    #[test]
    fn test_trend_analysis_direction() {
        let mut rng = StdRng::seed_from_u64(5);
        let factor = country_factor("US");
        let date = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let mut predictions: Vec<Prediction> = (1..=3)
            .map(|m| predict_month(&MetricsSnapshot::default(), m, date, &factor, &mut rng))
            .collect();

        predictions[0].safety_score = 80.0;
        predictions[1].safety_score = 45.0;
        predictions[2].safety_score = 70.0;

        let trend = analyze_series_trend(&predictions).unwrap();
        assert_eq!(trend.overall_trend, TrendDirection::Deteriorating);
        assert_eq!(trend.score_change, -10.0);
        assert_eq!(trend.critical_periods.len(), 1);
        assert_eq!(trend.critical_periods[0].month, 2);

        let safety = assess_overall_safety(&predictions, "US").unwrap();
        assert_eq!(safety.minimum_safety_score, 45.0);
        assert_eq!(safety.average_safety_score, 65.0);
        assert_eq!(safety.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_empty_series_rejected() {
        assert!(matches!(analyze_series_trend(&[]), Err(ForecastError::EmptySeries)));
        assert!(matches!(assess_overall_safety(&[], "US"), Err(ForecastError::EmptySeries)));
    }

    #[test]
    fn test_simulated_baseline_ranges() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let s = simulate_baseline("BD", &mut rng);
            assert!((27.0..42.0).contains(&s.temperature));
            assert!((40.0..80.0).contains(&s.humidity));
            assert!((0.0..30.0).contains(&s.deforestation));
        }
    }
}
