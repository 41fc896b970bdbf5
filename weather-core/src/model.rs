use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub city: String,
}

/// Verbatim response body relayed from the upstream weather API.
///
/// The proxy never re-parses or re-serializes weather JSON on the success
/// path, so the payload stays exactly as the upstream sent it.
#[derive(Debug, Clone)]
pub struct WeatherPayload {
    pub body: Bytes,
}
