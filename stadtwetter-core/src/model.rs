use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair produced by the geocoder and consumed by the
/// weather client. Lives for a single submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Weather condition as reported by the observation service.
///
/// Brightsky may report `null` or a value we do not know; both decode to
/// [`RawCondition::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RawCondition {
    Dry,
    Fog,
    Rain,
    Sleet,
    Snow,
    Hail,
    Thunderstorm,
    Cloudy,
    #[serde(other)]
    #[default]
    Unknown,
}

impl RawCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            RawCondition::Dry => "dry",
            RawCondition::Fog => "fog",
            RawCondition::Rain => "rain",
            RawCondition::Sleet => "sleet",
            RawCondition::Snow => "snow",
            RawCondition::Hail => "hail",
            RawCondition::Thunderstorm => "thunderstorm",
            RawCondition::Cloudy => "cloudy",
            RawCondition::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RawCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current weather as observed at a coordinate pair, immutable once built.
///
/// Wind speed is kept in knots here; conversion to km/h happens in the
/// pipeline so no intermediate rounding sneaks in.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub temperature_c: f64,
    pub condition: RawCondition,
    pub wind_speed_knots: f64,
    pub wind_direction_deg: f64,
    pub humidity_pct: f64,
    pub cloud_cover_pct: f64,
    pub observed_at: DateTime<Utc>,
}

/// The sole output of a successful submission: everything the presentation
/// layer needs, already converted and classified.
#[derive(Debug, Clone, Serialize)]
pub struct CityWeather {
    pub city_name: String,
    /// Truncated toward zero, not rounded.
    pub temperature_c: i32,
    /// Derived from the unrounded observation, rounded to 1 decimal.
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    pub condition: RawCondition,
    pub observed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_decodes_lowercase_names() {
        let c: RawCondition = serde_json::from_str("\"thunderstorm\"").unwrap();
        assert_eq!(c, RawCondition::Thunderstorm);
    }

    #[test]
    fn unrecognized_condition_decodes_to_unknown() {
        let c: RawCondition = serde_json::from_str("\"volcanic-ash\"").unwrap();
        assert_eq!(c, RawCondition::Unknown);
    }
}
