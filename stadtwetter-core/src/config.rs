use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::geocode::DEFAULT_NOMINATIM_URL;
use crate::observation::DEFAULT_BRIGHTSKY_URL;
use crate::render::Language;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// language = "de"
///
/// [endpoints]
/// geocoding_url = "https://nominatim.example.org"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Display language for labels, condition names and the error message.
    #[serde(default)]
    pub language: Language,

    /// Optional endpoint overrides (self-hosted mirrors).
    #[serde(default)]
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Endpoints {
    pub geocoding_url: Option<String>,
    pub weather_url: Option<String>,
}

impl Config {
    pub fn geocoding_url(&self) -> &str {
        self.endpoints
            .geocoding_url
            .as_deref()
            .unwrap_or(DEFAULT_NOMINATIM_URL)
    }

    pub fn weather_url(&self) -> &str {
        self.endpoints
            .weather_url
            .as_deref()
            .unwrap_or(DEFAULT_BRIGHTSKY_URL)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "stadtwetter", "stadtwetter-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_german_with_public_endpoints() {
        let cfg = Config::default();

        assert_eq!(cfg.language, Language::De);
        assert_eq!(cfg.geocoding_url(), DEFAULT_NOMINATIM_URL);
        assert_eq!(cfg.weather_url(), DEFAULT_BRIGHTSKY_URL);
    }

    #[test]
    fn endpoint_overrides_take_precedence() {
        let cfg = Config {
            language: Language::En,
            endpoints: Endpoints {
                geocoding_url: Some("http://localhost:8080".to_string()),
                weather_url: None,
            },
        };

        assert_eq!(cfg.geocoding_url(), "http://localhost:8080");
        assert_eq!(cfg.weather_url(), DEFAULT_BRIGHTSKY_URL);
    }

    #[test]
    fn toml_roundtrip_preserves_language() {
        let cfg = Config { language: Language::En, ..Config::default() };

        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.language, Language::En);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.language, Language::De);
        assert!(parsed.endpoints.geocoding_url.is_none());
    }
}
