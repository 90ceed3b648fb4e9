use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::debug;

use crate::model::Coordinates;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = concat!("stadtwetter/", env!("CARGO_PKG_VERSION"));

/// Resolves a free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` means the service answered but knows no such place.
    async fn resolve(&self, city: &str) -> Result<Option<Coordinates>>;
}

/// Place search backed by Nominatim (OpenStreetMap). No API key required.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    base_url: String,
    http: Client,
}

impl NominatimClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_NOMINATIM_URL.to_string())
    }

    /// Point the client at a different endpoint (tests, self-hosted mirror).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn resolve(&self, city: &str) -> Result<Option<Coordinates>> {
        let url = format!("{}/search", self.base_url);

        debug!(city, "resolving city name via Nominatim");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("format", "jsonv2")])
            .send()
            .await
            .context("Failed to send request to Nominatim (place search)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Nominatim response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Nominatim place search failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).context("Failed to parse Nominatim JSON")?;

        let Some(first) = places.first() else {
            debug!(city, "Nominatim returned no results");
            return Ok(None);
        };

        let coords = Coordinates {
            latitude: first.lat.as_f64()?,
            longitude: first.lon.as_f64()?,
        };

        debug!(
            city,
            latitude = coords.latitude,
            longitude = coords.longitude,
            "resolved city name"
        );

        Ok(Some(coords))
    }
}

/// Nominatim serializes lat/lon as decimal strings; be liberal and accept
/// plain numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DecimalField {
    Number(f64),
    Text(String),
}

impl DecimalField {
    fn as_f64(&self) -> Result<f64> {
        match self {
            DecimalField::Number(n) => Ok(*n),
            DecimalField::Text(s) => s
                .parse::<f64>()
                .with_context(|| format!("Nominatim returned a non-decimal coordinate: '{s}'")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: DecimalField,
    lon: DecimalField,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_parse_from_strings_and_numbers() {
        let as_strings: Vec<NominatimPlace> =
            serde_json::from_str(r#"[{"lat": "52.52", "lon": "13.405"}]"#).unwrap();
        assert_eq!(as_strings[0].lat.as_f64().unwrap(), 52.52);
        assert_eq!(as_strings[0].lon.as_f64().unwrap(), 13.405);

        let as_numbers: Vec<NominatimPlace> =
            serde_json::from_str(r#"[{"lat": 52.52, "lon": 13.405}]"#).unwrap();
        assert_eq!(as_numbers[0].lat.as_f64().unwrap(), 52.52);
    }

    #[test]
    fn garbage_coordinate_is_an_error() {
        let place: NominatimPlace =
            serde_json::from_str(r#"{"lat": "fifty-two", "lon": "13.4"}"#).unwrap();
        assert!(place.lat.as_f64().is_err());
    }
}
