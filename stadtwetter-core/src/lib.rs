//! Core library for the `stadtwetter` CLI.
//!
//! This crate defines:
//! - Shared domain models (coordinates, observations, results)
//! - The perceived-temperature formula library and condition classifier
//! - HTTP clients for geocoding (Nominatim) and current weather (Brightsky)
//! - The submission pipeline that sequences the two lookups
//! - A rendering model (labeled text blocks) consumed by front ends
//!
//! It is used by `stadtwetter-cli`, but can also be reused by other binaries
//! or services.

pub mod condition;
pub mod config;
pub mod error;
pub mod formula;
pub mod geocode;
pub mod model;
pub mod observation;
pub mod pipeline;
pub mod render;

pub use config::Config;
pub use error::LookupError;
pub use geocode::{Geocoder, NominatimClient};
pub use model::{CityWeather, Coordinates, RawCondition, RawObservation};
pub use observation::{BrightskyClient, ObservationSource};
pub use pipeline::{Pipeline, SubmissionGuard};
pub use render::{Block, Language, RenderTarget};
