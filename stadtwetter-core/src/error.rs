use thiserror::Error;

/// The two failure kinds a submission can end in.
///
/// Both are terminal for the current submission and render as the same fixed
/// message to the user; the variants (and their sources) stay distinguishable
/// for diagnostics.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The place search failed or returned no results for the city name.
    #[error("geocoding failed for '{city}'")]
    GeocodeFailed {
        city: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The current-conditions request failed or returned a malformed payload.
    #[error("weather fetch failed")]
    WeatherFetchFailed {
        #[source]
        source: anyhow::Error,
    },
}

impl LookupError {
    pub fn geocode_failed(city: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        LookupError::GeocodeFailed { city: city.into(), source }
    }

    pub fn weather_fetch_failed(source: anyhow::Error) -> Self {
        LookupError::WeatherFetchFailed { source }
    }
}
