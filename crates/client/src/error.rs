//! Error types for the docdrop client.

use thiserror::Error;

/// Errors that can occur when using the docdrop client.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection error (network failure, DNS resolution, timeout, etc.).
    #[error("connection error: {0}")]
    Connection(String),

    /// Non-success HTTP status returned by the endpoint.
    ///
    /// `message` carries the response body verbatim when the endpoint
    /// sent one, otherwise the status line's canonical reason.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// The text-download JSON envelope carried content that is not valid
    /// base64.
    #[error("failed to decode file content: {0}")]
    Decode(String),

    /// Response deserialization error.
    #[error("failed to deserialize response: {0}")]
    Deserialization(String),

    /// Client configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Returns `true` if retrying the request could plausibly succeed.
    ///
    /// Connection errors and HTTP 5xx are retryable; malformed payloads
    /// and configuration problems are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Decode(_) | Self::Deserialization(_) | Self::Configuration(_) => false,
        }
    }

    /// Returns `true` if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convert a non-success response into [`Error::Http`], preferring the
/// response body as the message.
pub(crate) async fn http_error(response: reqwest::Response) -> Error {
    let status = response.status();
    let message = match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Error::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error_is_retryable() {
        let err = Error::Connection("timeout".to_string());
        assert!(err.is_retryable());
        assert!(err.is_connection_error());
    }

    #[test]
    fn http_5xx_is_retryable() {
        let err = Error::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn http_4xx_is_not_retryable() {
        let err = Error::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn decode_and_deserialization_are_not_retryable() {
        assert!(!Error::Decode("bad padding".to_string()).is_retryable());
        assert!(!Error::Deserialization("invalid JSON".to_string()).is_retryable());
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = Error::Http {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }
}
