use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::debug;

use crate::model::{Coordinates, RawCondition, RawObservation};

pub const DEFAULT_BRIGHTSKY_URL: &str = "https://api.brightsky.dev";

/// Resolves a coordinate pair to the current observed weather.
#[async_trait]
pub trait ObservationSource: Send + Sync + Debug {
    async fn fetch(&self, coords: Coordinates) -> Result<RawObservation>;
}

/// Current-conditions client backed by Brightsky (DWD). No API key required.
#[derive(Debug, Clone)]
pub struct BrightskyClient {
    base_url: String,
    http: Client,
}

impl BrightskyClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BRIGHTSKY_URL.to_string())
    }

    /// Point the client at a different endpoint (tests, self-hosted mirror).
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url, http: Client::new() }
    }
}

impl Default for BrightskyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObservationSource for BrightskyClient {
    async fn fetch(&self, coords: Coordinates) -> Result<RawObservation> {
        let url = format!("{}/current_weather", self.base_url);

        debug!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            "fetching current weather via Brightsky"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to Brightsky (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Brightsky response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Brightsky current weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: BsCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse Brightsky current JSON")?;
        let weather = parsed.weather;

        Ok(RawObservation {
            temperature_c: weather.temperature,
            condition: weather.condition.unwrap_or_default(),
            // "_60" fields are 60-minute averages.
            wind_speed_knots: weather.wind_speed_60,
            wind_direction_deg: weather.wind_direction_60,
            humidity_pct: weather.relative_humidity,
            cloud_cover_pct: weather.cloud_cover,
            observed_at: weather.timestamp.unwrap_or_else(Utc::now),
        })
    }
}

#[derive(Debug, Deserialize)]
struct BsWeather {
    temperature: f64,
    condition: Option<RawCondition>,
    wind_speed_60: f64,
    wind_direction_60: f64,
    relative_humidity: f64,
    cloud_cover: f64,
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct BsCurrentResponse {
    weather: BsWeather,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
