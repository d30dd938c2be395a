//! Error types for the session layer.

use thiserror::Error;

/// Errors from the session layer.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Error from the underlying HTTP client.
    #[error(transparent)]
    Client(#[from] docdrop_client::Error),

    /// A `lastModified` value in the list response was not parsable
    /// date text.
    #[error("invalid lastModified timestamp {value:?}: {source}")]
    Timestamp {
        /// The offending wire text.
        value: String,
        /// Parse failure detail.
        source: chrono::ParseError,
    },

    /// Filesystem failure while saving a downloaded document.
    #[error("failed to save document: {0}")]
    Save(#[from] std::io::Error),
}
