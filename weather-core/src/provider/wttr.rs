use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::{
    error::ProviderError,
    model::{WeatherPayload, WeatherRequest},
    provider::UPSTREAM_TIMEOUT,
};

use super::WeatherProvider;

/// Real wttr.in endpoint; tests point `base_url` at a local stub.
pub const DEFAULT_BASE_URL: &str = "https://wttr.in";

/// Keyless upstream serving `{base_url}/{city}?format=j1`.
#[derive(Debug, Clone)]
pub struct WttrProvider {
    base_url: String,
    http: Client,
}

impl WttrProvider {
    pub fn new(base_url: String) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for wttr.in")?;

        Ok(Self { base_url, http })
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherPayload, ProviderError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(city)
        );

        let res = self.http.get(&url).query(&[("format", "j1")]).send().await?;

        let status = res.status();
        let body = res.bytes().await?;

        if status != StatusCode::OK {
            return Err(ProviderError::UpstreamStatus {
                status: status.as_u16(),
                message: "Failed to fetch weather".to_string(),
                details: None,
            });
        }

        Ok(WeatherPayload { body })
    }
}

#[async_trait]
impl WeatherProvider for WttrProvider {
    async fn get_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherPayload, ProviderError> {
        self.fetch_current(&request.city).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> WttrProvider {
        WttrProvider::new(server.uri()).expect("client must build")
    }

    #[tokio::test]
    async fn relays_upstream_body_untouched() {
        let server = MockServer::start().await;
        let upstream_body = r#"{"current_condition":[{"temp_C":"20"}]}"#;

        Mock::given(method("GET"))
            .and(path("/Paris"))
            .and(query_param("format", "j1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(upstream_body, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let payload = provider
            .get_weather(&WeatherRequest { city: "Paris".into() })
            .await
            .expect("fetch should succeed");

        assert_eq!(payload.body.as_ref(), upstream_body.as_bytes());
    }

    #[tokio::test]
    async fn non_200_maps_to_upstream_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Nowhere"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .get_weather(&WeatherRequest { city: "Nowhere".into() })
            .await
            .unwrap_err();

        match err {
            ProviderError::UpstreamStatus { status, message, details } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Failed to fetch weather");
                assert!(details.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn city_is_percent_encoded_into_the_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/New%20York"))
            .and(query_param("format", "j1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let result = provider.get_weather(&WeatherRequest { city: "New York".into() }).await;

        assert!(result.is_ok());
    }
}
