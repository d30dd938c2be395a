//! The document list presenter.
//!
//! Holds the in-memory listing, its sort order, and the download guard,
//! and reloads when the upload bus announces a new document. Shared
//! between tasks behind `Arc`; all state lives behind interior
//! mutability.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, broadcast};

use docdrop_client::{DocdropClient, RawDocument};
use docdrop_core::{
    DEFAULT_SORT_DIRECTION, DEFAULT_SORT_FIELD, DocumentItem, FileKind, SortDirection, SortField,
    sort_documents,
};

use crate::events::{DocumentEvent, UploadEvents};
use crate::OpsError;

/// Fixed user-facing message for any load failure.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load documents. Please try again later.";

/// A document written to disk by [`DocumentList::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    /// Where the content was written.
    pub path: PathBuf,
    /// MIME type inferred from the file name.
    pub content_type: &'static str,
}

#[derive(Debug)]
struct ListState {
    documents: Vec<DocumentItem>,
    sort_field: SortField,
    sort_direction: SortDirection,
    is_loading: bool,
    error: Option<String>,
}

/// Presenter for the stored-document listing.
#[derive(Debug)]
pub struct DocumentList {
    client: DocdropClient,
    state: RwLock<ListState>,
    load_seq: AtomicU64,
    download_in_progress: AtomicBool,
}

impl DocumentList {
    /// Create a presenter with the default sort (last modified,
    /// descending) and an empty listing.
    pub fn new(client: DocdropClient) -> Self {
        Self {
            client,
            state: RwLock::new(ListState {
                documents: Vec::new(),
                sort_field: DEFAULT_SORT_FIELD,
                sort_direction: DEFAULT_SORT_DIRECTION,
                is_loading: false,
                error: None,
            }),
            load_seq: AtomicU64::new(0),
            download_in_progress: AtomicBool::new(false),
        }
    }

    /// Reload the listing from the store.
    ///
    /// Concurrent calls are allowed; each call takes a monotonic sequence
    /// number at issue time, and a response that is no longer the newest
    /// is discarded so stale data never overwrites a fresher listing.
    pub async fn load_documents(&self) -> Result<(), OpsError> {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
        }

        let result = self.client.list_documents().await;

        // The check must happen under the write lock: a newer load could
        // otherwise complete and store between an early check and our
        // write, and then be clobbered here.
        let mut state = self.state.write().await;
        if seq != self.load_seq.load(Ordering::SeqCst) {
            tracing::warn!(seq, "discarding stale document list response");
            return Ok(());
        }
        state.is_loading = false;
        match result.map_err(OpsError::from).and_then(parse_documents) {
            Ok(mut documents) => {
                sort_documents(&mut documents, state.sort_field, state.sort_direction);
                state.documents = documents;
                Ok(())
            }
            Err(error) => {
                state.error = Some(LOAD_ERROR_MESSAGE.to_string());
                Err(error)
            }
        }
    }

    /// Re-sort the listing by `field` in `direction`.
    pub async fn sort_documents(&self, field: SortField, direction: SortDirection) {
        let mut state = self.state.write().await;
        state.sort_field = field;
        state.sort_direction = direction;
        sort_documents(&mut state.documents, field, direction);
    }

    /// Toggle sorting: the active field flips direction, a new field
    /// starts ascending. Re-sorts either way.
    pub async fn toggle_sort(&self, field: SortField) {
        let mut state = self.state.write().await;
        if state.sort_field == field {
            state.sort_direction = state.sort_direction.toggle();
        } else {
            state.sort_field = field;
            state.sort_direction = SortDirection::Asc;
        }
        let (field, direction) = (state.sort_field, state.sort_direction);
        sort_documents(&mut state.documents, field, direction);
    }

    /// Download a document and save it under `dest_dir`.
    ///
    /// Only one download may be outstanding per presenter: a call while
    /// another is in flight is a silent no-op returning `Ok(None)`, not
    /// queued and not an error. The guard has no timeout; it is released
    /// when the transfer settles, on success or failure alike.
    pub async fn download(
        &self,
        key: &str,
        file_name: &str,
        dest_dir: &Path,
    ) -> Result<Option<SavedDocument>, OpsError> {
        if self.download_in_progress.swap(true, Ordering::SeqCst) {
            tracing::debug!(key, "download already in progress; ignoring request");
            return Ok(None);
        }
        let result = self.download_inner(key, file_name, dest_dir).await;
        self.download_in_progress.store(false, Ordering::SeqCst);
        result.map(Some)
    }

    /// [`download`](Self::download) for an item from the listing.
    pub async fn download_document(
        &self,
        doc: &DocumentItem,
        dest_dir: &Path,
    ) -> Result<Option<SavedDocument>, OpsError> {
        self.download(&doc.key, &doc.file_name, dest_dir).await
    }

    async fn download_inner(
        &self,
        key: &str,
        file_name: &str,
        dest_dir: &Path,
    ) -> Result<SavedDocument, OpsError> {
        let bytes = self.client.download_file(key, file_name).await?;

        // Keep writes inside dest_dir even if the store hands back a
        // name with path separators.
        let safe_name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| OpsError::Configuration(format!("unusable file name: {file_name}")))?;
        let path = dest_dir.join(safe_name);
        tokio::fs::write(&path, &bytes).await?;

        Ok(SavedDocument {
            path,
            content_type: FileKind::from_file_name(file_name).mime(),
        })
    }

    /// Spawn a task that reloads the listing whenever the bus announces
    /// an upload. The task ends when the bus closes.
    pub fn spawn_refresh_task(
        self: &Arc<Self>,
        events: &UploadEvents,
    ) -> tokio::task::JoinHandle<()> {
        let list = Arc::clone(self);
        let mut rx = events.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(DocumentEvent::Uploaded) => list.refresh_after_upload().await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "upload event bus lagged; refreshing once");
                        list.refresh_after_upload().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    async fn refresh_after_upload(&self) {
        if let Err(error) = self.load_documents().await {
            tracing::warn!(%error, "listing refresh after upload failed");
        }
    }

    /// The current listing, in display order.
    pub async fn documents(&self) -> Vec<DocumentItem> {
        self.state.read().await.documents.clone()
    }

    /// The current load error message, if the last load failed.
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Whether a load is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    /// The active sort field.
    pub async fn sort_field(&self) -> SortField {
        self.state.read().await.sort_field
    }

    /// The active sort direction.
    pub async fn sort_direction(&self) -> SortDirection {
        self.state.read().await.sort_direction
    }
}

/// Map wire records into typed items, parsing `lastModified` strictly.
fn parse_documents(raw: Vec<RawDocument>) -> Result<Vec<DocumentItem>, OpsError> {
    raw.into_iter()
        .map(|record| {
            let last_modified = DateTime::parse_from_rfc3339(&record.last_modified)
                .map_err(|source| OpsError::Timestamp {
                    value: record.last_modified.clone(),
                    source,
                })?
                .with_timezone(&Utc);
            Ok(DocumentItem {
                key: record.key,
                file_name: record.file_name,
                size: record.size,
                last_modified,
            })
        })
        .collect()
}
