use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::provider::ProviderId;

/// Listen address used when the config does not name one.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:5000";

/// Configuration overrides for a single provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    /// Upstream endpoint override; defaults to the provider's real API.
    pub base_url: Option<String>,

    /// Name of the environment variable holding the API key, for
    /// providers that require one.
    pub api_key_env: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Provider id, e.g. "wttr" or "openweather". Defaults to "wttr".
    pub provider: Option<String>,

    /// Listen address, e.g. "0.0.0.0:5000".
    pub listen: Option<String>,

    /// Overrides the selected provider's default city.
    pub default_city: Option<String>,

    /// Example TOML:
    /// [providers.openweather]
    /// api_key_env = "OPENWEATHER_API_KEY"
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    /// Return the selected provider as a strongly-typed ProviderId.
    pub fn provider_id(&self) -> Result<ProviderId> {
        match self.provider.as_deref() {
            Some(s) => ProviderId::try_from(s),
            None => Ok(ProviderId::Wttr),
        }
    }

    pub fn listen_addr(&self) -> String {
        self.listen.clone().unwrap_or_else(|| DEFAULT_LISTEN.to_string())
    }

    /// City used for requests that omit the `city` parameter.
    pub fn default_city(&self, id: ProviderId) -> String {
        self.default_city.clone().unwrap_or_else(|| id.default_city().to_string())
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Load config from an explicit path, or from the platform config
    /// directory, or return an empty default if no file exists yet.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::config_file_path()?;
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-proxy", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderId;

    #[test]
    fn provider_defaults_to_wttr() {
        let cfg = Config::default();
        assert_eq!(cfg.provider_id().unwrap(), ProviderId::Wttr);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let cfg = Config { provider: Some("accuweather".into()), ..Config::default() };

        let err = cfg.provider_id().unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn listen_defaults_to_all_interfaces_port_5000() {
        let cfg = Config::default();
        assert_eq!(cfg.listen_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn default_city_follows_provider_unless_overridden() {
        let cfg = Config::default();
        assert_eq!(cfg.default_city(ProviderId::Wttr), "Delhi");
        assert_eq!(cfg.default_city(ProviderId::OpenWeather), "London");

        let cfg = Config { default_city: Some("Oslo".into()), ..Config::default() };
        assert_eq!(cfg.default_city(ProviderId::Wttr), "Oslo");
    }

    #[test]
    fn parses_provider_tables_from_toml() {
        let cfg: Config = toml::from_str(
            r#"
            provider = "openweather"
            listen = "127.0.0.1:8080"

            [providers.openweather]
            base_url = "http://localhost:9000"
            api_key_env = "OW_KEY"
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.provider_id().unwrap(), ProviderId::OpenWeather);
        assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");

        let ow = cfg.provider_config(ProviderId::OpenWeather).expect("table must exist");
        assert_eq!(ow.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(ow.api_key_env.as_deref(), Some("OW_KEY"));
    }
}
