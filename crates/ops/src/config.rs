//! Configuration for the session layer.

use std::time::Duration;

use docdrop_client::{DocdropClient, DocdropClientBuilder};

use crate::OpsError;

/// Configuration for connecting to a docdrop endpoint.
#[derive(Debug, Clone)]
pub struct OpsConfig {
    /// Document store endpoint URL.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Option<Duration>,
}

impl OpsConfig {
    /// Create a new configuration with defaults.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `DOCDROP_ENDPOINT` (defaults to `http://localhost:8080`)
    /// - `DOCDROP_TIMEOUT_SECS` (optional, default 30)
    pub fn from_env() -> Self {
        let endpoint = std::env::var("DOCDROP_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        let timeout = std::env::var("DOCDROP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        Self { endpoint, timeout }
    }

    /// Override the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build an HTTP client from this configuration.
    pub fn client(&self) -> Result<DocdropClient, OpsError> {
        let mut builder = DocdropClientBuilder::new(&self.endpoint);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| OpsError::Configuration(e.to_string()))
    }
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_client_from_explicit_endpoint() {
        let config = OpsConfig::new("http://127.0.0.1:9999/").with_timeout(Duration::from_secs(5));
        let client = config.client().expect("client should build");
        assert_eq!(client.endpoint(), "http://127.0.0.1:9999");
    }
}
