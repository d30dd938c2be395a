//! The `downloadFile` operation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::Deserialize;

use docdrop_core::FileKind;

use crate::error::http_error;
use crate::{DocdropClient, Error};

/// JSON envelope the store wraps text-file content in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextDownloadEnvelope {
    file_content: String,
}

impl DocdropClient {
    /// Download a document's content.
    ///
    /// Issues `GET ?action=downloadFile&key=…`. The response shape depends
    /// on the extension of `file_name`, not on anything the store
    /// declares:
    ///
    /// - text files (`txt`) arrive as a JSON envelope
    ///   `{"fileContent": "<base64>"}` and are decoded here;
    /// - every other kind is requested with an `Accept` header from the
    ///   file-kind oracle and returned as the raw body.
    ///
    /// The bifurcation mirrors the store's transport contract and must
    /// not be collapsed while that contract stands.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), docdrop_client::Error> {
    /// use docdrop_client::DocdropClient;
    ///
    /// let client = DocdropClient::new("http://localhost:8080");
    /// let bytes = client.download_file("abc123", "report.pdf").await?;
    /// println!("{} bytes", bytes.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn download_file(&self, key: &str, file_name: &str) -> Result<Bytes, Error> {
        let kind = FileKind::from_file_name(file_name);
        let request = self
            .http()
            .get(self.endpoint())
            .query(&[("action", "downloadFile"), ("key", key)]);

        if kind.is_text() {
            let response = request
                .send()
                .await
                .map_err(|e| Error::Connection(e.to_string()))?;
            if !response.status().is_success() {
                return Err(http_error(response).await);
            }
            let envelope = response
                .json::<TextDownloadEnvelope>()
                .await
                .map_err(|e| Error::Deserialization(e.to_string()))?;
            let content = BASE64
                .decode(envelope.file_content)
                .map_err(|e| Error::Decode(e.to_string()))?;
            Ok(Bytes::from(content))
        } else {
            let response = request
                .header(reqwest::header::ACCEPT, kind.mime())
                .send()
                .await
                .map_err(|e| Error::Connection(e.to_string()))?;
            if !response.status().is_success() {
                return Err(http_error(response).await);
            }
            response
                .bytes()
                .await
                .map_err(|e| Error::Connection(e.to_string()))
        }
    }
}
