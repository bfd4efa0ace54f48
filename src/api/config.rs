//! Client configuration.

use std::time::Duration;

/// Settings for talking to the strategy backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash
    pub base_url: String,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// How long idempotent reads keep retrying transient failures
    pub max_retry_elapsed: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(30),
            max_retry_elapsed: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}
