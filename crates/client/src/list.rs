//! The `listDocuments` operation.

use serde::{Deserialize, Serialize};

use crate::error::http_error;
use crate::{DocdropClient, Error};

/// One document record as it appears on the wire.
///
/// `last_modified` stays as the text the store sent; parsing it into a
/// structured timestamp is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    /// Opaque stable identifier addressing the content.
    pub key: String,
    /// Display name, including the extension used for type inference.
    pub file_name: String,
    /// Byte length.
    pub size: u64,
    /// Last-write timestamp as date text.
    pub last_modified: String,
}

#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    documents: Vec<RawDocument>,
}

impl DocdropClient {
    /// List all stored documents.
    ///
    /// Issues `GET ?action=listDocuments` and returns the raw records in
    /// the order the store sent them.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), docdrop_client::Error> {
    /// use docdrop_client::DocdropClient;
    ///
    /// let client = DocdropClient::new("http://localhost:8080");
    /// let documents = client.list_documents().await?;
    /// println!("{} documents", documents.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_documents(&self) -> Result<Vec<RawDocument>, Error> {
        let response = self
            .http()
            .get(self.endpoint())
            .query(&[("action", "listDocuments")])
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            let body = response
                .json::<ListDocumentsResponse>()
                .await
                .map_err(|e| Error::Deserialization(e.to_string()))?;
            Ok(body.documents)
        } else {
            Err(http_error(response).await)
        }
    }
}
