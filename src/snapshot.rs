//! Environmental metric snapshots
//!
//! `MetricsSnapshot` is the fully-populated record every computation works on.
//! `EnvironmentalInput` is the request-side view where any field may be
//! missing; `resolve()` fills the gaps with the dashboard baseline values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ForecastError;

/// One reading (or projection) of the seven tracked metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// °C
    pub temperature: f64,
    /// Relative humidity, %
    pub humidity: f64,
    /// Air quality index (higher = worse)
    pub air_quality: f64,
    /// Forest loss, % per year
    pub deforestation: f64,
    /// ppm-equivalent
    pub carbon_emission: f64,
    /// %, higher = cleaner
    pub water_quality: f64,
    /// Index 0-100
    pub biodiversity: f64,
}

/// Baseline used for any field the caller leaves out.
pub const BASELINE: MetricsSnapshot = MetricsSnapshot {
    temperature: 25.0,
    humidity: 60.0,
    air_quality: 100.0,
    deforestation: 20.0,
    carbon_emission: 50.0,
    water_quality: 70.0,
    biodiversity: 65.0,
};

impl Default for MetricsSnapshot {
    fn default() -> Self {
        BASELINE
    }
}

impl MetricsSnapshot {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::AirQuality => self.air_quality,
            Metric::Deforestation => self.deforestation,
            Metric::CarbonEmission => self.carbon_emission,
            Metric::WaterQuality => self.water_quality,
            Metric::Biodiversity => self.biodiversity,
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Temperature => self.temperature = value,
            Metric::Humidity => self.humidity = value,
            Metric::AirQuality => self.air_quality = value,
            Metric::Deforestation => self.deforestation = value,
            Metric::CarbonEmission => self.carbon_emission = value,
            Metric::WaterQuality => self.water_quality = value,
            Metric::Biodiversity => self.biodiversity = value,
        }
    }

    /// Floor every value at 0 and keep percentage-like fields within [0, 100].
    ///
    /// NaN passes through untouched (`f64::max`/`min` would silently replace it).
    pub fn clamped(mut self) -> Self {
        for metric in Metric::ALL {
            let value = self.get(metric);
            if value.is_nan() {
                continue;
            }
            let floored = value.max(0.0);
            let bounded = if metric.is_percentage() {
                floored.min(100.0)
            } else {
                floored
            };
            self.set(metric, bounded);
        }
        self
    }
}

/// The seven tracked metrics, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Temperature,
    Humidity,
    AirQuality,
    Deforestation,
    CarbonEmission,
    WaterQuality,
    Biodiversity,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::AirQuality,
        Metric::Deforestation,
        Metric::CarbonEmission,
        Metric::WaterQuality,
        Metric::Biodiversity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::AirQuality => "airQuality",
            Metric::Deforestation => "deforestation",
            Metric::CarbonEmission => "carbonEmission",
            Metric::WaterQuality => "waterQuality",
            Metric::Biodiversity => "biodiversity",
        }
    }

    /// Fields reported as a percentage (or 0-100 index) get an upper bound.
    pub fn is_percentage(&self) -> bool {
        matches!(
            self,
            Metric::Humidity | Metric::Deforestation | Metric::WaterQuality | Metric::Biodiversity
        )
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ForecastError::UnknownMetric(s.to_string()))
    }
}

/// Caller-supplied snapshot; absent fields fall back to [`BASELINE`].
///
/// Unknown keys (pressure, windSpeed, ...) are accepted and ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalInput {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub air_quality: Option<f64>,
    pub deforestation: Option<f64>,
    pub carbon_emission: Option<f64>,
    pub water_quality: Option<f64>,
    pub biodiversity: Option<f64>,
}

impl EnvironmentalInput {
    /// Only absent or null fields take the baseline; an explicit `0` is kept
    /// as a reading rather than treated as falsy.
    pub fn resolve(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            temperature: self.temperature.unwrap_or(BASELINE.temperature),
            humidity: self.humidity.unwrap_or(BASELINE.humidity),
            air_quality: self.air_quality.unwrap_or(BASELINE.air_quality),
            deforestation: self.deforestation.unwrap_or(BASELINE.deforestation),
            carbon_emission: self.carbon_emission.unwrap_or(BASELINE.carbon_emission),
            water_quality: self.water_quality.unwrap_or(BASELINE.water_quality),
            biodiversity: self.biodiversity.unwrap_or(BASELINE.biodiversity),
        }
    }
}

impl From<MetricsSnapshot> for EnvironmentalInput {
    fn from(s: MetricsSnapshot) -> Self {
        Self {
            temperature: Some(s.temperature),
            humidity: Some(s.humidity),
            air_quality: Some(s.air_quality),
            deforestation: Some(s.deforestation),
            carbon_emission: Some(s.carbon_emission),
            water_quality: Some(s.water_quality),
            biodiversity: Some(s.biodiversity),
        }
    }
}
