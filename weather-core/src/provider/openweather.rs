use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::env;

use crate::{
    error::ProviderError,
    model::{WeatherPayload, WeatherRequest},
    provider::UPSTREAM_TIMEOUT,
};

use super::WeatherProvider;

/// Real OpenWeatherMap endpoint; tests point `base_url` at a local stub.
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Environment variable read for the API key unless config names another.
pub const DEFAULT_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Credentialed upstream serving the OpenWeatherMap current-weather API.
///
/// The API key is read from the environment on every request, never stored
/// in the provider.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    api_key_env: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: String, api_key_env: String) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for OpenWeatherMap")?;

        Ok(Self { base_url, api_key_env, http })
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherPayload, ProviderError> {
        let api_key = env::var(&self.api_key_env).map_err(|_| {
            ProviderError::MissingCredential { var: self.api_key_env.clone() }
        })?;

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", city), ("units", "metric"), ("appid", api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;

        if status != StatusCode::OK {
            return Err(ProviderError::UpstreamStatus {
                status: status.as_u16(),
                message: "failed to fetch from OpenWeatherMap".to_string(),
                details: serde_json::from_slice(&body).ok(),
            });
        }

        Ok(WeatherPayload { body })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherPayload, ProviderError> {
        self.fetch_current(&request.city).await
    }
}
