use thiserror::Error;

/// Request-path failures surfaced by a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A required credential is absent from the server environment.
    /// No outbound call is made in this case.
    #[error("{var} not set on server")]
    MissingCredential { var: String },

    /// The upstream answered with a non-200 status. `message` is the
    /// provider's fixed error string; `details` carries the upstream body
    /// for envelopes that relay it.
    #[error("upstream returned status {status}")]
    UpstreamStatus {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Connection failure or timeout before a status was received.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
