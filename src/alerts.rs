//! Safety alert feed
//!
//! Alerts are drawn from a per-country profile of common hazards, filled in
//! from fixed templates and placed at random coordinates inside the
//! country's bounding box. The feed is regenerated on every call.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::country::{country_bounds, country_name, normalize_code};

pub const ALERT_SOURCE: &str = "LEO Environmental Monitoring System";

/// Look-back window for alert timestamps
const ALERT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hazard {
    Flooding,
    AirQuality,
    WaterContamination,
    Cyclone,
    HeatWave,
    Wildfire,
    Deforestation,
    Drought,
    Hurricane,
    WaterScarcity,
    Pollution,
    BiodiversityLoss,
    Fire,
    WaterPollution,
    IndustrialEmissions,
    GeneralEnvironmental,
    ClimateChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Info,
    Warning,
    Critical,
}

impl AlertType {
    /// Severity range (0-100) an alert of this type is drawn from
    pub fn severity_range(&self) -> (f64, f64) {
        match self {
            AlertType::Critical => (85.0, 100.0),
            AlertType::Warning => (60.0, 80.0),
            AlertType::Info => (30.0, 60.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSeverity {
    Medium,
    High,
}

/// Hazards a country typically reports
#[derive(Debug, Clone, PartialEq)]
pub struct AlertProfile {
    pub common: &'static [Hazard],
    pub severity: ProfileSeverity,
}

pub fn alert_profile(code: &str) -> AlertProfile {
    use Hazard::*;
    match normalize_code(code).as_str() {
        "BD" => AlertProfile {
            common: &[Flooding, AirQuality, WaterContamination, Cyclone],
            severity: ProfileSeverity::High,
        },
        "IN" => AlertProfile {
            common: &[AirQuality, WaterScarcity, HeatWave, Pollution],
            severity: ProfileSeverity::High,
        },
        "US" => AlertProfile {
            common: &[Wildfire, Hurricane, AirQuality, Drought],
            severity: ProfileSeverity::Medium,
        },
        "BR" => AlertProfile {
            common: &[Deforestation, Drought, BiodiversityLoss, Fire],
            severity: ProfileSeverity::High,
        },
        "CN" => AlertProfile {
            common: &[AirQuality, WaterPollution, IndustrialEmissions],
            severity: ProfileSeverity::High,
        },
        _ => AlertProfile {
            common: &[GeneralEnvironmental, ClimateChange],
            severity: ProfileSeverity::Medium,
        },
    }
}

/// Title, description and type for a hazard.
///
/// Hazards without a dedicated template get a generic informational alert.
pub fn alert_template(hazard: Hazard) -> (&'static str, &'static str, AlertType) {
    match hazard {
        Hazard::Flooding => (
            "Flood Risk Alert",
            "Heavy rainfall and rising water levels detected in multiple regions",
            AlertType::Critical,
        ),
        Hazard::AirQuality => (
            "Air Quality Emergency",
            "PM2.5 levels exceed WHO guidelines in urban areas",
            AlertType::Critical,
        ),
        Hazard::WaterContamination => (
            "Water Quality Alert",
            "Bacterial contamination detected in water supply systems",
            AlertType::Warning,
        ),
        Hazard::Cyclone => (
            "Tropical Cyclone Warning",
            "Severe weather system approaching coastal regions",
            AlertType::Critical,
        ),
        Hazard::HeatWave => (
            "Extreme Heat Warning",
            "Temperatures exceeding 40°C expected for extended period",
            AlertType::Warning,
        ),
        Hazard::Wildfire => (
            "Wildfire Risk Alert",
            "High fire danger conditions with low humidity and strong winds",
            AlertType::Warning,
        ),
        Hazard::Deforestation => (
            "Deforestation Alert",
            "Rapid forest loss detected in protected areas",
            AlertType::Critical,
        ),
        Hazard::Drought => (
            "Drought Conditions",
            "Severe water shortage affecting agricultural regions",
            AlertType::Warning,
        ),
        _ => (
            "Environmental Alert",
            "Environmental monitoring system detected anomalous conditions",
            AlertType::Info,
        ),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyAlert {
    pub id: String,
    pub hazard: Hazard,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub severity: f64,
    pub resolved: bool,
    /// `[lat, lon]`
    pub coordinates: [f64; 2],
    pub affected_population: u64,
    pub source: String,
}

/// Between 2 and 5 alerts for `country_code`, newest first.
pub fn generate_safety_alerts<R: Rng + ?Sized>(
    country_code: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<SafetyAlert> {
    let code = normalize_code(country_code);
    let profile = alert_profile(&code);
    let bounds = country_bounds(&code);
    let name = country_name(&code);
    let count = rng.gen_range(2..=5);

    let mut alerts: Vec<SafetyAlert> = (0..count)
        .map(|i| {
            let hazard = profile
                .common
                .choose(rng)
                .copied()
                .unwrap_or(Hazard::GeneralEnvironmental);
            let (title, description, alert_type) = alert_template(hazard);
            let (low, high) = alert_type.severity_range();
            let age_ms = rng.gen_range(0..ALERT_WINDOW_DAYS * 86_400_000);

            SafetyAlert {
                id: format!("alert-{}-{}", code, i),
                hazard,
                title: title.to_string(),
                description: description.to_string(),
                alert_type,
                location: format!("{} - Region {}", name, i + 1),
                timestamp: now - Duration::milliseconds(age_ms),
                severity: rng.gen_range(low..high),
                resolved: rng.gen_bool(0.3),
                coordinates: [
                    rng.gen_range(bounds.lat.0..bounds.lat.1),
                    rng.gen_range(bounds.lon.0..bounds.lon.1),
                ],
                affected_population: rng.gen_range(10_000..1_010_000),
                source: ALERT_SOURCE.to_string(),
            }
        })
        .collect();

    alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    alerts
}
