//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! backend URL, Mapbox geocoding settings, display locale and the last
//! used login email.
//!
//! Configuration is stored at `~/.config/houselink/config.json`. Values can
//! be overridden with `HOUSELINK_API_URL`, `MAPBOX_ACCESS_TOKEN`,
//! `MAPBOX_BASE_URL` and `HOUSELINK_LOCALE` (a `.env` file is honoured by
//! the binary).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::notice::Locale;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "houselink";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
const DEFAULT_MAPBOX_BASE_URL: &str = "https://api.mapbox.com";

/// Geocoding timeout in seconds.
/// Superseded lookups are cancelled anyway; this only bounds a hung request.
const DEFAULT_GEOCODE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapboxConfig {
    pub access_token: Option<String>,
    pub base_url: String,
    pub language: String,
    pub country: Option<String>,
    pub types: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: DEFAULT_MAPBOX_BASE_URL.to_string(),
            language: "en".to_string(),
            country: Some("la".to_string()),
            types: ["address", "poi", "neighborhood", "locality", "place"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            timeout_secs: DEFAULT_GEOCODE_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub locale: Locale,
    pub mapbox: MapboxConfig,
    pub last_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            locale: Locale::default(),
            mapbox: MapboxConfig::default(),
            last_email: None,
        }
    }
}

impl Config {
    /// Load from the default location and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from a specific file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Persist the last used login email. Only the file's own values are
    /// written back, never environment or command line overrides.
    pub fn remember_email(email: &str) -> Result<()> {
        let path = Self::config_path()?;
        let mut stored = Self::load_from(&path)?;
        stored.last_email = Some(email.to_string());
        stored.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply overrides from a key lookup (the process environment in practice)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("HOUSELINK_API_URL").filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(token) = lookup("MAPBOX_ACCESS_TOKEN").filter(|v| !v.is_empty()) {
            self.mapbox.access_token = Some(token);
        }
        if let Some(url) = lookup("MAPBOX_BASE_URL").filter(|v| !v.is_empty()) {
            self.mapbox.base_url = url;
        }
        if let Some(locale) = lookup("HOUSELINK_LOCALE") {
            match locale.parse::<Locale>() {
                Ok(locale) => self.locale = locale,
                Err(_) => warn!(locale = %locale, "Ignoring unknown HOUSELINK_LOCALE"),
            }
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"api_base_url": "https://api.example.com"}"#).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.mapbox.base_url, DEFAULT_MAPBOX_BASE_URL);
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("HOUSELINK_API_URL", "https://staging.example.com/api"),
            ("MAPBOX_ACCESS_TOKEN", "pk.abc"),
            ("HOUSELINK_LOCALE", "lo"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.api_base_url, "https://staging.example.com/api");
        assert_eq!(config.mapbox.access_token.as_deref(), Some("pk.abc"));
        assert_eq!(config.locale, Locale::Lo);
    }

    #[test]
    fn test_unknown_locale_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "HOUSELINK_LOCALE").then(|| "fr".to_string()));
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = crate::utils::test_dir("config");
        let path = dir.join("config.json");
        let mut config = Config::default();
        config.last_email = Some("admin@example.com".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(Config::load_from(&dir.join("missing.json")).unwrap(), Config::default());
    }
}
