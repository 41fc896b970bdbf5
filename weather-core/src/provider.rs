use crate::{
    Config, ProviderError, WeatherPayload, WeatherRequest,
    provider::{openweather::OpenWeatherProvider, wttr::WttrProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, time::Duration};

pub mod openweather;
pub mod wttr;

/// Timeout applied to every outbound call to an upstream weather API.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Wttr,
    OpenWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Wttr => "wttr",
            ProviderId::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Wttr, ProviderId::OpenWeather]
    }

    /// City used when a request does not name one.
    pub fn default_city(&self) -> &'static str {
        match self {
            ProviderId::Wttr => "Delhi",
            ProviderId::OpenWeather => "London",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "wttr" => Ok(ProviderId::Wttr),
            "openweather" => Ok(ProviderId::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: wttr, openweather."
            )),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherPayload, ProviderError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let overrides = config.provider_config(id);
    let base_url = overrides.and_then(|c| c.base_url.clone());

    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::Wttr => Box::new(WttrProvider::new(
            base_url.unwrap_or_else(|| wttr::DEFAULT_BASE_URL.to_string()),
        )?),
        ProviderId::OpenWeather => {
            let api_key_env = overrides
                .and_then(|c| c.api_key_env.clone())
                .unwrap_or_else(|| openweather::DEFAULT_API_KEY_ENV.to_string());

            Box::new(OpenWeatherProvider::new(
                base_url.unwrap_or_else(|| openweather::DEFAULT_BASE_URL.to_string()),
                api_key_env,
            )?)
        }
    };

    Ok(boxed)
}
