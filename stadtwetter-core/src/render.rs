//! Presentation model: labeled text blocks plus the fixed translation
//! tables.
//!
//! Front ends only ever see a list of [`Block`]s and must fully replace
//! whatever they showed before.

use serde::{Deserialize, Serialize};

use crate::model::{CityWeather, RawCondition};

/// One unit of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Labeled { label: String, value: String },
    Error(String),
}

/// A surface the pipeline's output is rendered onto.
pub trait RenderTarget {
    /// Replace all previously rendered content with `blocks`.
    fn replace(&mut self, blocks: &[Block]);
}

/// Display language. The tables are fixed; adding a language means adding a
/// match arm here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }

    pub fn condition_label(&self, condition: RawCondition) -> &'static str {
        match self {
            Language::De => match condition {
                RawCondition::Dry => "Klarer Himmel",
                RawCondition::Fog => "Nebel",
                RawCondition::Rain => "Regen",
                RawCondition::Sleet => "Schneeregen",
                RawCondition::Snow => "Schnee",
                RawCondition::Hail => "Hagel",
                RawCondition::Thunderstorm => "Gewitter",
                RawCondition::Cloudy => "Bewölkt",
                RawCondition::Unknown => "Unbekannt",
            },
            Language::En => match condition {
                RawCondition::Dry => "Clear sky",
                RawCondition::Fog => "Fog",
                RawCondition::Rain => "Rain",
                RawCondition::Sleet => "Sleet",
                RawCondition::Snow => "Snow",
                RawCondition::Hail => "Hail",
                RawCondition::Thunderstorm => "Thunderstorm",
                RawCondition::Cloudy => "Cloudy",
                RawCondition::Unknown => "Unknown",
            },
        }
    }

    /// The single fixed message shown for any failed submission.
    pub fn error_message(&self) -> &'static str {
        match self {
            Language::De => "Fehler bei der Ermittlung des Wetters für die angegebene Stadt.",
            Language::En => "Error determining weather for the given city.",
        }
    }

    fn heading(&self, city: &str) -> String {
        match self {
            Language::De => format!("Ergebnisse für {city}"),
            Language::En => format!("Results for {city}"),
        }
    }

    fn field_labels(&self) -> FieldLabels {
        match self {
            Language::De => FieldLabels {
                temperature: "Temperatur",
                humidity: "Luftfeuchtigkeit",
                feels_like: "Gefühlte Temperatur",
                wind: "Wind",
                condition: "Wetterlage",
                wind_from: "aus",
                degrees: "Grad",
            },
            Language::En => FieldLabels {
                temperature: "Temperature",
                humidity: "Humidity",
                feels_like: "Feels like",
                wind: "Wind",
                condition: "Conditions",
                wind_from: "from",
                degrees: "degrees",
            },
        }
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "de" => Ok(Language::De),
            "en" => Ok(Language::En),
            _ => Err(anyhow::anyhow!("Unknown language '{s}'. Supported: de, en.")),
        }
    }
}

struct FieldLabels {
    temperature: &'static str,
    humidity: &'static str,
    feels_like: &'static str,
    wind: &'static str,
    condition: &'static str,
    wind_from: &'static str,
    degrees: &'static str,
}

/// Build the ordered block sequence for a successful submission.
pub fn render(result: &CityWeather, lang: Language) -> Vec<Block> {
    let labels = lang.field_labels();

    vec![
        Block::Heading(lang.heading(&result.city_name)),
        Block::Labeled {
            label: labels.temperature.to_string(),
            value: format!("{}°C", result.temperature_c),
        },
        Block::Labeled {
            label: labels.feels_like.to_string(),
            value: format!("{} °C", result.feels_like_c),
        },
        Block::Labeled {
            label: labels.humidity.to_string(),
            value: format!("{} %", result.humidity_pct),
        },
        Block::Labeled {
            label: labels.wind.to_string(),
            value: format!(
                "{:.0} Km/h {} {:.0} {}",
                result.wind_speed_kmh,
                labels.wind_from,
                result.wind_direction_deg,
                labels.degrees
            ),
        },
        Block::Labeled {
            label: labels.condition.to_string(),
            value: lang.condition_label(result.condition).to_string(),
        },
    ]
}

/// Build the single error block for a failed submission.
pub fn render_error(lang: Language) -> Vec<Block> {
    vec![Block::Error(lang.error_message().to_string())]
}
