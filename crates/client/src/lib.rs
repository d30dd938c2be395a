//! Docdrop HTTP Client
//!
//! A native Rust client for the docdrop serverless document store.
//!
//! The store exposes a single HTTP endpoint; the operation is selected by
//! an `action` query parameter rather than by path. This crate issues the
//! three request kinds the endpoint understands — `listDocuments`,
//! `uploadFile`, and `downloadFile` — and decodes their responses into
//! typed results.
//!
//! # Quick Start
//!
//! ```no_run
//! use docdrop_client::DocdropClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), docdrop_client::Error> {
//!     let client = DocdropClient::new("https://abc123.execute-api.example.com/prod");
//!
//!     for doc in client.list_documents().await? {
//!         println!("{} ({} bytes)", doc.file_name, doc.size);
//!     }
//!
//!     let payload = client.upload_file("hello.txt", b"Hello".to_vec()).await?;
//!     println!("upload response: {payload}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Use the builder for custom configuration:
//!
//! ```no_run
//! use docdrop_client::DocdropClientBuilder;
//! use std::time::Duration;
//!
//! let client = DocdropClientBuilder::new("https://abc123.execute-api.example.com/prod")
//!     .timeout(Duration::from_secs(60))
//!     .build()
//!     .unwrap();
//! ```

mod download;
mod error;
mod list;
mod upload;

pub use error::Error;
pub use list::RawDocument;
pub use upload::{DOCUMENT_VALUE_CODE, DOCUMENT_VALUE_TYPE_CODE, UploadProgress};

use std::time::Duration;

use reqwest::Client;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the docdrop document store.
///
/// All three operations target the same endpoint URL; the store
/// discriminates on the `action` query parameter.
#[derive(Debug, Clone)]
pub struct DocdropClient {
    client: Client,
    endpoint: String,
}

/// Builder for configuring a [`DocdropClient`].
#[derive(Debug)]
pub struct DocdropClientBuilder {
    endpoint: String,
    timeout: Duration,
    client: Option<Client>,
}

impl DocdropClientBuilder {
    /// Create a new builder with the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// Useful for configuring TLS, proxies, or other advanced settings.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<DocdropClient, Error> {
        let client = match self.client {
            Some(c) => c,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| Error::Configuration(e.to_string()))?,
        };

        Ok(DocdropClient {
            client,
            endpoint: self.endpoint,
        })
    }
}

impl DocdropClient {
    /// Create a new client with default configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docdrop_client::DocdropClient;
    ///
    /// let client = DocdropClient::new("https://abc123.execute-api.example.com/prod");
    /// ```
    pub fn new(endpoint: impl Into<String>) -> Self {
        DocdropClientBuilder::new(endpoint)
            .build()
            .expect("default client configuration should not fail")
    }

    /// Create a builder for advanced configuration.
    pub fn builder(endpoint: impl Into<String>) -> DocdropClientBuilder {
        DocdropClientBuilder::new(endpoint)
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = DocdropClient::new("http://localhost:8080/");
        assert_eq!(client.endpoint(), "http://localhost:8080");
    }

    #[test]
    fn client_preserves_url_without_slash() {
        let client = DocdropClient::new("http://localhost:8080");
        assert_eq!(client.endpoint(), "http://localhost:8080");
    }

    #[test]
    fn builder_accepts_custom_timeout() {
        let client = DocdropClientBuilder::new("http://localhost:8080")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080");
    }
}
