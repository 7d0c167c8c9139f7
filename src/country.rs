//! Country lookup tables
//!
//! Per-country trend multipliers used by the projector, plus the display and
//! narrative data the API responses attach. Only BD, US, BR and IN carry
//! explicit trend tables; every other code trends neutrally.

use serde::{Deserialize, Serialize};

use crate::snapshot::Metric;

/// Trend multipliers, one per metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryFactor {
    pub temperature_trend: f64,
    pub humidity_trend: f64,
    pub air_quality_trend: f64,
    pub deforestation_trend: f64,
    pub carbon_trend: f64,
    pub water_quality_trend: f64,
    pub biodiversity_trend: f64,
}

impl CountryFactor {
    /// All multipliers 1.0
    pub const NEUTRAL: CountryFactor = CountryFactor {
        temperature_trend: 1.0,
        humidity_trend: 1.0,
        air_quality_trend: 1.0,
        deforestation_trend: 1.0,
        carbon_trend: 1.0,
        water_quality_trend: 1.0,
        biodiversity_trend: 1.0,
    };

    pub fn for_metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature_trend,
            Metric::Humidity => self.humidity_trend,
            Metric::AirQuality => self.air_quality_trend,
            Metric::Deforestation => self.deforestation_trend,
            Metric::CarbonEmission => self.carbon_trend,
            Metric::WaterQuality => self.water_quality_trend,
            Metric::Biodiversity => self.biodiversity_trend,
        }
    }
}

impl Default for CountryFactor {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Normalise a user-supplied code for table lookups.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Trend multipliers for an ISO alpha-2 code, neutral for unlisted codes.
pub fn country_factor(code: &str) -> CountryFactor {
    match normalize_code(code).as_str() {
        // Bangladesh: high climate vulnerability
        "BD" => CountryFactor {
            temperature_trend: 1.2,
            humidity_trend: 1.1,
            air_quality_trend: 1.3,
            deforestation_trend: 0.8,
            carbon_trend: 1.1,
            water_quality_trend: 0.7,
            biodiversity_trend: 0.8,
        },
        "US" => CountryFactor {
            temperature_trend: 1.0,
            humidity_trend: 1.0,
            air_quality_trend: 0.9,
            deforestation_trend: 0.9,
            carbon_trend: 1.2,
            water_quality_trend: 0.95,
            biodiversity_trend: 0.9,
        },
        // Brazil: Amazon deforestation
        "BR" => CountryFactor {
            temperature_trend: 1.1,
            humidity_trend: 0.9,
            air_quality_trend: 1.1,
            deforestation_trend: 1.5,
            carbon_trend: 1.3,
            water_quality_trend: 0.9,
            biodiversity_trend: 0.7,
        },
        // India: pollution
        "IN" => CountryFactor {
            temperature_trend: 1.2,
            humidity_trend: 1.0,
            air_quality_trend: 1.4,
            deforestation_trend: 1.1,
            carbon_trend: 1.3,
            water_quality_trend: 0.8,
            biodiversity_trend: 0.85,
        },
        _ => CountryFactor::NEUTRAL,
    }
}

/// Display name, or the code itself when unknown.
pub fn country_name(code: &str) -> String {
    let code = normalize_code(code);
    let name = match code.as_str() {
        "BD" => Some("Bangladesh"),
        "US" => Some("United States"),
        "IN" => Some("India"),
        "CN" => Some("China"),
        "BR" => Some("Brazil"),
        "RU" => Some("Russia"),
        "CA" => Some("Canada"),
        "AU" => Some("Australia"),
        _ => None,
    };
    name.map(str::to_string).unwrap_or(code)
}

/// Narrative risk drivers attached to the safety assessment.
pub fn country_risk_factors(code: &str) -> Vec<String> {
    let factors: &[&str] = match normalize_code(code).as_str() {
        "BD" => &["Sea level rise vulnerability", "Monsoon flooding", "High population density"],
        "US" => &["Regional climate variability", "Industrial emissions", "Urban heat islands"],
        "BR" => &["Amazon deforestation", "Agricultural expansion", "Biodiversity loss"],
        "IN" => &["Air pollution", "Water scarcity", "Urban population growth"],
        _ => &["General climate change impacts"],
    };
    factors.iter().map(|s| s.to_string()).collect()
}

/// Latitude/longitude bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub lat: (f64, f64),
    pub lon: (f64, f64),
}

impl GeoBounds {
    pub const GLOBE: GeoBounds = GeoBounds {
        lat: (-90.0, 90.0),
        lon: (-180.0, 180.0),
    };

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat.0..=self.lat.1).contains(&lat) && (self.lon.0..=self.lon.1).contains(&lon)
    }
}

pub fn country_bounds(code: &str) -> GeoBounds {
    match normalize_code(code).as_str() {
        "BD" => GeoBounds { lat: (20.5, 26.6), lon: (88.0, 92.7) },
        "US" => GeoBounds { lat: (24.4, 49.4), lon: (-125.0, -66.9) },
        "IN" => GeoBounds { lat: (8.1, 37.1), lon: (68.1, 97.4) },
        "CN" => GeoBounds { lat: (18.2, 53.6), lon: (73.5, 134.8) },
        "BR" => GeoBounds { lat: (-33.8, 5.3), lon: (-74.0, -28.8) },
        _ => GeoBounds::GLOBE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_code_is_neutral() {
        assert_eq!(country_factor("ZZ"), CountryFactor::NEUTRAL);
        assert_eq!(country_factor(""), CountryFactor::NEUTRAL);
        // CN has names and bounds but no trend table
        assert_eq!(country_factor("CN"), CountryFactor::NEUTRAL);

        for metric in Metric::ALL {
            assert_eq!(CountryFactor::NEUTRAL.for_metric(metric), 1.0);
        }
    }

    #[test]
    fn test_neutral_wire_shape() {
        let json = serde_json::to_value(country_factor("XX")).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        for key in [
            "temperatureTrend",
            "humidityTrend",
            "airQualityTrend",
            "deforestationTrend",
            "carbonTrend",
            "waterQualityTrend",
            "biodiversityTrend",
        ] {
            assert_eq!(obj[key], 1.0, "{} should be neutral", key);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(country_factor("br"), country_factor("BR"));
        assert_eq!(country_factor(" in ").air_quality_trend, 1.4);
        assert_eq!(country_factor("BR").deforestation_trend, 1.5);
    }

    #[test]
    fn test_names_and_narratives() {
        assert_eq!(country_name("bd"), "Bangladesh");
        assert_eq!(country_name("FR"), "FR");
        assert_eq!(country_risk_factors("IN").len(), 3);
        assert_eq!(country_risk_factors("FR"), vec!["General climate change impacts"]);
    }

    #[test]
    fn test_bounds_fallback_to_globe() {
        assert_eq!(country_bounds("NO"), GeoBounds::GLOBE);
        assert!(country_bounds("BD").contains(23.7, 90.4));
        assert!(!country_bounds("BD").contains(51.5, -0.1));
    }
}
