//! The `uploadFile` operation.

use std::path::Path;

use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use tokio::sync::watch;
use tokio_util::io::ReaderStream;

use docdrop_core::FileKind;

use crate::error::http_error;
use crate::{DocdropClient, Error};

/// Fixed `documentValueCode` form field sent with every upload.
///
/// Deployment constant of the current store; not user-configurable.
pub const DOCUMENT_VALUE_CODE: &str = "DD";

/// Fixed `documentValueTypeCode` form field sent with every upload.
pub const DOCUMENT_VALUE_TYPE_CODE: &str = "DDD";

/// Snapshot of upload transfer progress.
///
/// `sent` counts bytes handed to the transport, so the percentage is
/// derived from the actual transfer rather than a timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadProgress {
    /// Bytes handed to the transport so far.
    pub sent: u64,
    /// Total bytes to send.
    pub total: u64,
}

impl UploadProgress {
    /// Progress as a 0–100 percentage. Zero-length uploads report 0
    /// until completion is signaled by the caller.
    #[allow(clippy::cast_possible_truncation)]
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            0
        } else {
            ((self.sent.saturating_mul(100)) / self.total).min(100) as u8
        }
    }
}

impl DocdropClient {
    /// Upload a document from an in-memory buffer.
    ///
    /// Issues `POST ?action=uploadFile` with a multipart form holding the
    /// `file` part plus the two fixed deployment text fields. The
    /// multipart encoder owns the content-type header and boundary.
    ///
    /// Returns the store's opaque JSON success payload.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), docdrop_client::Error> {
    /// use docdrop_client::DocdropClient;
    ///
    /// let client = DocdropClient::new("http://localhost:8080");
    /// let payload = client.upload_file("notes.txt", b"hello".to_vec()).await?;
    /// println!("{payload}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_file(
        &self,
        file_name: impl Into<String>,
        content: Vec<u8>,
    ) -> Result<serde_json::Value, Error> {
        let file_name = file_name.into();
        let kind = FileKind::from_file_name(&file_name);
        let part = Part::bytes(content)
            .file_name(file_name)
            .mime_str(kind.mime())
            .map_err(|e| Error::Configuration(e.to_string()))?;
        self.send_upload(part).await
    }

    /// Upload a document from disk, streaming its content.
    ///
    /// Behaves like [`upload_file`](Self::upload_file) but reads the file
    /// through a byte-counting stream; each chunk handed to the transport
    /// publishes an [`UploadProgress`] snapshot on `progress`.
    pub async fn upload_path(
        &self,
        path: impl AsRef<Path>,
        progress: Option<watch::Sender<UploadProgress>>,
    ) -> Result<serde_json::Value, Error> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(ToString::to_string)
            .ok_or_else(|| {
                Error::Configuration(format!("path has no usable file name: {}", path.display()))
            })?;
        let kind = FileKind::from_file_name(&file_name);

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| Error::Configuration(e.to_string()))?;
        let total = metadata.len();

        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let mut sent: u64 = 0;
        let counted = ReaderStream::new(file).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                sent += bytes.len() as u64;
                if let Some(tx) = &progress {
                    let _ = tx.send(UploadProgress { sent, total });
                }
            }
            chunk
        });

        let part = Part::stream_with_length(reqwest::Body::wrap_stream(counted), total)
            .file_name(file_name)
            .mime_str(kind.mime())
            .map_err(|e| Error::Configuration(e.to_string()))?;
        self.send_upload(part).await
    }

    async fn send_upload(&self, file_part: Part) -> Result<serde_json::Value, Error> {
        let form = Form::new()
            .part("file", file_part)
            .text("documentValueCode", DOCUMENT_VALUE_CODE)
            .text("documentValueTypeCode", DOCUMENT_VALUE_TYPE_CODE);

        let response = self
            .http()
            .post(self.endpoint())
            .query(&[("action", "uploadFile")])
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| Error::Deserialization(e.to_string()))
        } else {
            Err(http_error(response).await)
        }
    }
}
