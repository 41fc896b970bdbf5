//! HTTP surface of the weather proxy.
//!
//! One JSON endpoint relays the configured upstream's response verbatim;
//! upstream failures are translated into a small error envelope carrying
//! the upstream's status code.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use weather_core::{ProviderError, WeatherProvider, WeatherRequest};

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Read-only state shared across requests.
#[derive(Debug)]
pub struct AppState {
    pub provider: Box<dyn WeatherProvider>,
    pub default_city: String,
}

/// Query parameters accepted by the weather endpoint.
#[derive(Debug, Deserialize)]
struct WeatherQuery {
    city: Option<String>,
}

/// Envelope returned for every handled failure.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "ok"
}

async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherQuery>,
) -> Response {
    let city = params.city.unwrap_or_else(|| state.default_city.clone());
    let request = WeatherRequest { city };

    match state.provider.get_weather(&request).await {
        Ok(payload) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            payload.body,
        )
            .into_response(),
        Err(err) => {
            tracing::warn!("weather request for '{}' failed: {err}", request.city);
            error_response(err)
        }
    }
}

fn error_response(err: ProviderError) -> Response {
    let (status, body) = match err {
        ProviderError::MissingCredential { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody { error: err.to_string(), details: None },
        ),
        ProviderError::UpstreamStatus { status, message, details } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            ErrorBody { error: message, details },
        ),
        ProviderError::Transport(_) => (
            StatusCode::BAD_GATEWAY,
            ErrorBody { error: err.to_string(), details: None },
        ),
    };

    (status, Json(body)).into_response()
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/weather", get(get_weather))
        .with_state(state)
}
