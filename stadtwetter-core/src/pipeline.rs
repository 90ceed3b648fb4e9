use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::condition::classify;
use crate::error::LookupError;
use crate::formula::{feels_like, knots_to_kmh, truncate_celsius};
use crate::geocode::Geocoder;
use crate::model::CityWeather;
use crate::observation::ObservationSource;

/// Sequences geocoding, the weather fetch and the derived fields into one
/// submission.
///
/// Each call to [`Pipeline::submit`] is independent; the two network calls
/// are strictly sequential and nothing is shared between submissions. There
/// is no cancellation: a caller firing a second submission while an earlier
/// one is in flight must deal with out-of-order completion itself, see
/// [`SubmissionGuard`].
#[derive(Debug)]
pub struct Pipeline<G, S> {
    geocoder: G,
    source: S,
}

impl<G: Geocoder, S: ObservationSource> Pipeline<G, S> {
    pub fn new(geocoder: G, source: S) -> Self {
        Self { geocoder, source }
    }

    /// Run one submission for `city`.
    pub async fn submit(&self, city: &str) -> Result<CityWeather, LookupError> {
        let coords = match self.geocoder.resolve(city).await {
            Ok(Some(coords)) => coords,
            Ok(None) => {
                warn!(city, "no geocoding results");
                return Err(LookupError::geocode_failed(city, None));
            }
            Err(source) => {
                warn!(city, error = %source, "geocoding request failed");
                return Err(LookupError::geocode_failed(city, Some(source)));
            }
        };

        let obs = self.source.fetch(coords).await.map_err(|source| {
            warn!(city, error = %source, "weather fetch failed");
            LookupError::weather_fetch_failed(source)
        })?;

        // km/h conversion and feels-like both work on the raw values; only
        // the display temperature is truncated.
        let wind_speed_kmh = knots_to_kmh(obs.wind_speed_knots);
        let feels_like_c = feels_like(obs.temperature_c, obs.humidity_pct, wind_speed_kmh);

        let result = CityWeather {
            city_name: city.to_string(),
            temperature_c: truncate_celsius(obs.temperature_c),
            feels_like_c,
            humidity_pct: obs.humidity_pct,
            wind_speed_kmh,
            wind_direction_deg: obs.wind_direction_deg,
            condition: classify(obs.condition, obs.cloud_cover_pct),
            observed_at: obs.observed_at,
        };

        debug!(city, temperature_c = result.temperature_c, feels_like_c, "submission complete");

        Ok(result)
    }
}

/// Monotonic generation counter guarding a shared rendering target against
/// stale completions.
///
/// Submissions are never cancelled, so one fired later can still finish
/// first. Callers take a generation at submit time and only render when
/// [`SubmissionGuard::commit`] accepts it.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    issued: AtomicU64,
    committed: AtomicU64,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new submission, returning its generation.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns true if `generation` is newer than anything rendered so far
    /// and records it; false means the result is stale and must be dropped.
    pub fn commit(&self, generation: u64) -> bool {
        self.committed
            .fetch_max(generation, Ordering::Relaxed) < generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, RawCondition, RawObservation};
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use chrono::Utc;

    #[derive(Debug)]
    struct FixedGeocoder(Option<Coordinates>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, _city: &str) -> Result<Option<Coordinates>> {
            Ok(self.0)
        }
    }

    #[derive(Debug)]
    struct FailingGeocoder;

    #[async_trait]
    impl Geocoder for FailingGeocoder {
        async fn resolve(&self, _city: &str) -> Result<Option<Coordinates>> {
            Err(anyhow!("connection refused"))
        }
    }

    #[derive(Debug)]
    struct FixedSource(RawObservation);

    #[async_trait]
    impl ObservationSource for FixedSource {
        async fn fetch(&self, _coords: Coordinates) -> Result<RawObservation> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct FailingSource;

    #[async_trait]
    impl ObservationSource for FailingSource {
        async fn fetch(&self, _coords: Coordinates) -> Result<RawObservation> {
            Err(anyhow!("503 service unavailable"))
        }
    }

    fn observation(temperature_c: f64) -> RawObservation {
        RawObservation {
            temperature_c,
            condition: RawCondition::Dry,
            wind_speed_knots: 10.0,
            wind_direction_deg: 180.0,
            humidity_pct: 60.0,
            cloud_cover_pct: 20.0,
            observed_at: Utc::now(),
        }
    }

    fn berlin() -> Coordinates {
        Coordinates { latitude: 52.52, longitude: 13.405 }
    }

    #[tokio::test]
    async fn successful_submission_derives_all_fields() {
        let pipeline = Pipeline::new(FixedGeocoder(Some(berlin())), FixedSource(observation(30.0)));

        let result = pipeline.submit("Berlin").await.unwrap();

        assert_eq!(result.city_name, "Berlin");
        assert_eq!(result.temperature_c, 30);
        assert_eq!(result.wind_speed_kmh, 18.52);
        // 30 °C takes the heat-index branch.
        assert_eq!(result.feels_like_c, 32.8);
        assert_eq!(result.condition, RawCondition::Dry);
        assert_eq!(result.wind_direction_deg, 180.0);
    }

    #[tokio::test]
    async fn feels_like_uses_unrounded_temperature() {
        // Display shows 29 but the heat index must see 29.9.
        let pipeline = Pipeline::new(FixedGeocoder(Some(berlin())), FixedSource(observation(29.9)));

        let result = pipeline.submit("Berlin").await.unwrap();

        assert_eq!(result.temperature_c, 29);
        assert_eq!(result.feels_like_c, crate::formula::heat_index(29.9, 60.0));
        assert_ne!(result.feels_like_c, crate::formula::heat_index(29.0, 60.0));
    }

    #[tokio::test]
    async fn heavy_cloud_cover_reclassifies_dry() {
        let mut obs = observation(12.0);
        obs.cloud_cover_pct = 90.0;
        let pipeline = Pipeline::new(FixedGeocoder(Some(berlin())), FixedSource(obs));

        let result = pipeline.submit("Berlin").await.unwrap();
        assert_eq!(result.condition, RawCondition::Cloudy);
    }

    #[tokio::test]
    async fn empty_geocode_result_is_geocode_failed() {
        let pipeline = Pipeline::new(FixedGeocoder(None), FixedSource(observation(5.0)));

        let err = pipeline.submit("Nirgendwo").await.unwrap_err();
        assert!(matches!(err, LookupError::GeocodeFailed { .. }));
    }

    #[tokio::test]
    async fn geocode_transport_error_is_geocode_failed() {
        let pipeline = Pipeline::new(FailingGeocoder, FixedSource(observation(5.0)));

        let err = pipeline.submit("Berlin").await.unwrap_err();
        assert!(matches!(err, LookupError::GeocodeFailed { .. }));
    }

    #[tokio::test]
    async fn weather_error_is_weather_fetch_failed() {
        let pipeline = Pipeline::new(FixedGeocoder(Some(berlin())), FailingSource);

        let err = pipeline.submit("Berlin").await.unwrap_err();
        assert!(matches!(err, LookupError::WeatherFetchFailed { .. }));
    }

    #[test]
    fn guard_rejects_stale_generations() {
        let guard = SubmissionGuard::new();

        let first = guard.begin();
        let second = guard.begin();
        assert!(second > first);

        // The newer submission finishes first.
        assert!(guard.commit(second));
        // The older one resolves late and must be dropped.
        assert!(!guard.commit(first));
    }

    #[test]
    fn guard_accepts_in_order_completions() {
        let guard = SubmissionGuard::new();

        let first = guard.begin();
        let second = guard.begin();

        assert!(guard.commit(first));
        assert!(guard.commit(second));
    }
}
