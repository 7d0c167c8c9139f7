//! Historical + forecast time series with simple analyses
//!
//! History is synthesised month by month from a seasonal baseline plus
//! country-scaled drift; the forecast continues from the last historical
//! month using the shared projector and safety scorer, so both halves of the
//! series are scored the same way as `/api/ai-predictions`.
//!
//! Analyses operate on one selected field (a metric or the safety score):
//! - least-squares trend
//! - month-of-year seasonal profile
//! - z-score anomaly detection

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::country::{country_factor, CountryFactor};
use crate::error::{ForecastError, Result};
use crate::projection::project_snapshot;
use crate::scoring::{calculate_safety_score, CONFIDENCE_FLOOR};
use crate::snapshot::{Metric, MetricsSnapshot};
use crate::utils::{linear_fit, mean, month_index, month_start, population_std_dev, round_to};

pub const DEFAULT_TIME_RANGE: i64 = 12;
pub const DEFAULT_FORECAST_HORIZON: i64 = 6;
pub const MAX_TIME_RANGE: u32 = 120;

/// Forecast confidence drops faster here than on the prediction series.
pub fn forecast_confidence(months_ahead: u32) -> f64 {
    round_to((0.95 - months_ahead as f64 * 0.08).max(CONFIDENCE_FLOOR), 2)
}

/// Slopes below this magnitude count as flat
const FLAT_SLOPE: f64 = 0.1;
const ANOMALY_SIGMA: f64 = 2.5;
const SEVERE_ANOMALY_SIGMA: f64 = 3.0;

/// A metric or the safety score, selectable by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesField {
    Metric(Metric),
    SafetyScore,
}

impl SeriesField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesField::Metric(m) => m.as_str(),
            SeriesField::SafetyScore => "safetyScore",
        }
    }
}

impl fmt::Display for SeriesField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesField {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("safetyScore") {
            return Ok(SeriesField::SafetyScore);
        }
        s.parse::<Metric>().map(SeriesField::Metric)
    }
}

impl Serialize for SeriesField {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
    pub safety_score: f64,
    pub prediction: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl SeriesPoint {
    pub fn value(&self, field: SeriesField) -> f64 {
        match field {
            SeriesField::Metric(m) => self.metrics.get(m),
            SeriesField::SafetyScore => self.safety_score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimeSeries {
    pub historical: Vec<SeriesPoint>,
    pub forecast: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Historical points followed by the forecast
    pub fn combined(&self) -> Vec<SeriesPoint> {
        self.historical.iter().chain(self.forecast.iter()).cloned().collect()
    }
}

/// Synthesise `time_range` months of history (plus the current month) and
/// `horizon` forecast months.
pub fn generate_time_series<R: Rng + ?Sized>(
    country_code: &str,
    time_range: u32,
    horizon: u32,
    today: NaiveDate,
    rng: &mut R,
) -> Result<TimeSeries> {
    if time_range == 0 || time_range > MAX_TIME_RANGE {
        return Err(ForecastError::InvalidTimeRange {
            got: time_range as i64,
            max: MAX_TIME_RANGE,
        });
    }
    let factor = country_factor(country_code);

    let historical = (0..=time_range)
        .rev()
        .map(|i| -> Result<SeriesPoint> {
            let date = month_start(today, -(i as i64))?;
            let progress = (time_range - i) as f64 / time_range as f64;
            Ok(historical_point(date, progress, &factor, rng))
        })
        .collect::<Result<Vec<_>>>()?;

    let last = historical
        .last()
        .map(|p| p.metrics)
        .ok_or(ForecastError::EmptySeries)?;

    let forecast = (1..=horizon)
        .map(|i| -> Result<SeriesPoint> {
            let date = month_start(today, i as i64)?;
            let metrics = project_snapshot(&last, i, &factor, rng);
            Ok(SeriesPoint {
                date,
                metrics,
                safety_score: calculate_safety_score(&metrics, i),
                prediction: true,
                confidence: Some(forecast_confidence(i)),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TimeSeries { historical, forecast })
}

fn historical_point<R: Rng + ?Sized>(
    date: NaiveDate,
    progress: f64,
    factor: &CountryFactor,
    rng: &mut R,
) -> SeriesPoint {
    let phase = month_index(date) as f64 / 12.0 * 2.0 * PI;
    let mut jitter = |width: f64| (rng.gen::<f64>() - 0.5) * width;

    let metrics = MetricsSnapshot {
        temperature: 20.0 + phase.sin() * 8.0 + progress * factor.temperature_trend * 2.0 + jitter(4.0),
        humidity: 60.0 + (phase + PI / 2.0).sin() * 15.0 + jitter(12.0),
        air_quality: 80.0 + progress * factor.air_quality_trend * 20.0 + jitter(25.0),
        deforestation: 15.0 + progress * factor.deforestation_trend * 8.0 + jitter(4.0),
        carbon_emission: 50.0 + progress * 12.0 + jitter(8.0),
        water_quality: 75.0 - progress * 10.0 + jitter(10.0),
        biodiversity: 70.0 - progress * 8.0 + jitter(8.0),
    }
    .clamped();

    SeriesPoint {
        date,
        metrics,
        safety_score: calculate_safety_score(&metrics, 0),
        prediction: false,
        confidence: None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendFit {
    pub direction: TrendDirection,
    /// Slope per month
    pub rate: f64,
    /// R², floored at 0
    pub confidence: f64,
    pub volatility: f64,
}

pub fn analyze_trend(points: &[SeriesPoint], field: SeriesField) -> TrendFit {
    let values: Vec<f64> = points.iter().map(|p| p.value(field)).collect();
    let Some(fit) = linear_fit(&values) else {
        return TrendFit {
            direction: TrendDirection::InsufficientData,
            rate: 0.0,
            confidence: 0.0,
            volatility: 0.0,
        };
    };

    let direction = if fit.slope.abs() > FLAT_SLOPE {
        if fit.slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    } else {
        TrendDirection::Stable
    };

    TrendFit {
        direction,
        rate: fit.slope,
        // Constant series give NaN
        confidence: if fit.r_squared.is_nan() { 0.0 } else { fit.r_squared.max(0.0) },
        volatility: population_std_dev(&values),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalPattern {
    /// Spread between the highest and lowest month-of-year mean
    pub amplitude: f64,
    /// Zero-based month with the highest mean
    pub peak_month: u32,
    pub strength: f64,
}

/// Month-of-year profile. Months with no observations are left out.
pub fn analyze_seasonal(points: &[SeriesPoint], field: SeriesField) -> SeasonalPattern {
    let values: Vec<f64> = points.iter().map(|p| p.value(field)).collect();
    let Some(overall) = mean(&values) else {
        return SeasonalPattern {
            amplitude: 0.0,
            peak_month: 0,
            strength: 0.0,
        };
    };

    let mut buckets: [Vec<f64>; 12] = Default::default();
    for point in points {
        buckets[month_index(point.date) as usize].push(point.value(field));
    }

    let deviations: Vec<(u32, f64)> = buckets
        .iter()
        .enumerate()
        .filter_map(|(month, vals)| mean(vals).map(|m| (month as u32, m - overall)))
        .collect();

    let (peak_month, max_dev) = deviations
        .iter()
        .copied()
        .fold((0, f64::NEG_INFINITY), |best, d| if d.1 > best.1 { d } else { best });
    let min_dev = deviations.iter().map(|d| d.1).fold(f64::INFINITY, f64::min);
    let amplitude = max_dev - min_dev;

    let spread = population_std_dev(&values);
    let strength = if spread > 0.0 { amplitude / (2.0 * spread) } else { 0.0 };

    SeasonalPattern {
        amplitude,
        peak_month,
        strength,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub date: NaiveDate,
    pub value: f64,
    pub is_anomaly: bool,
    pub severity: AnomalySeverity,
}

/// Points more than 2.5σ from the mean; beyond 3σ is high severity.
pub fn detect_anomalies(points: &[SeriesPoint], field: SeriesField) -> Vec<Anomaly> {
    let values: Vec<f64> = points.iter().map(|p| p.value(field)).collect();
    let Some(mu) = mean(&values) else {
        return Vec::new();
    };
    let sigma = population_std_dev(&values);

    points
        .iter()
        .zip(values.iter())
        .filter_map(|(point, &value)| {
            let distance = (value - mu).abs();
            if distance > ANOMALY_SIGMA * sigma {
                Some(Anomaly {
                    date: point.date,
                    value,
                    is_anomaly: true,
                    severity: if distance > SEVERE_ANOMALY_SIGMA * sigma {
                        AnomalySeverity::High
                    } else {
                        AnomalySeverity::Medium
                    },
                })
            } else {
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    Stable,
    Volatile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub trend_strength: Strength,
    pub seasonal_strength: Strength,
    pub anomaly_count: usize,
    pub overall_stability: Stability,
}

pub fn summarize(trend: &TrendFit, seasonal: &SeasonalPattern, anomalies: &[Anomaly]) -> AnalysisSummary {
    let rate = trend.rate.abs();
    let trend_strength = if rate > 0.5 {
        Strength::Strong
    } else if rate > 0.1 {
        Strength::Moderate
    } else {
        Strength::Weak
    };
    let seasonal_strength = if seasonal.strength > 0.3 {
        Strength::Strong
    } else if seasonal.strength > 0.1 {
        Strength::Moderate
    } else {
        Strength::Weak
    };
    let overall_stability = if anomalies.len() < 3 && rate < 0.3 {
        Stability::Stable
    } else {
        Stability::Volatile
    };

    AnalysisSummary {
        trend_strength,
        seasonal_strength,
        anomaly_count: anomalies.len(),
        overall_stability,
    }
}
