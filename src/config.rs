//! Application-level configuration loading, including the offline game catalog.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dto::game::GameDetails;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "GAME_SHELF_CONFIG_PATH";
const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Default)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    lookup: LookupConfig,
    catalog: Vec<GameDetails>,
}

/// Where game names are resolved when a game is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Endpoint of a JSON enrichment service. `None` selects the built-in catalog.
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
        }
    }
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        catalog = app_config.catalog.len(),
                        remote_lookup = app_config.lookup.base_url.is_some(),
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a configuration document.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    pub fn lookup(&self) -> &LookupConfig {
        &self.lookup
    }

    /// Games resolvable without a remote lookup service.
    pub fn catalog(&self) -> &[GameDetails] {
        &self.catalog
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    lookup: Option<RawLookup>,
    #[serde(default)]
    catalog: Vec<GameDetails>,
}

#[derive(Debug, Deserialize)]
struct RawLookup {
    base_url: Option<String>,
    timeout_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let lookup = value
            .lookup
            .map(|raw| LookupConfig {
                base_url: raw.base_url.filter(|url| !url.trim().is_empty()),
                timeout: Duration::from_millis(
                    raw.timeout_ms.unwrap_or(DEFAULT_LOOKUP_TIMEOUT_MS),
                ),
            })
            .unwrap_or_default();

        Self {
            lookup,
            catalog: value.catalog,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lookup_and_catalog() {
        let config = AppConfig::from_json(
            r#"{
                "lookup": { "base_url": "http://bgg.local/resolve", "timeout_ms": 1500 },
                "catalog": [
                    { "name": "Catan", "yearPublished": 1995, "minPlayers": 3, "maxPlayers": 4 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.lookup().base_url.as_deref(),
            Some("http://bgg.local/resolve")
        );
        assert_eq!(config.lookup().timeout, Duration::from_millis(1500));
        assert_eq!(config.catalog().len(), 1);
        assert_eq!(config.catalog()[0].year_published, Some(1995));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config.lookup(), &LookupConfig::default());
        assert!(config.catalog().is_empty());
    }

    #[test]
    fn blank_base_url_selects_catalog() {
        let config = AppConfig::from_json(r#"{ "lookup": { "base_url": "  " } }"#).unwrap();
        assert!(config.lookup().base_url.is_none());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(AppConfig::from_json(r#"{ "catalog": 3 }"#).is_err());
    }
}
