//! The upload controller.
//!
//! Validates a selected file against the upload allow-list, drives the
//! client's upload operation with genuine transfer progress, and
//! announces completed uploads on the event bus.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::{RwLock, watch};

use docdrop_client::{DocdropClient, UploadProgress};
use docdrop_core::{ALLOWED_EXTENSIONS, extension_allowed};

use crate::events::{DocumentEvent, UploadEvents};

/// Upload failures, validation and transfer alike.
#[derive(Debug, Error)]
pub enum UploadError {
    /// `upload` was called with nothing selected.
    #[error("Please select a file to upload")]
    NoFileSelected,

    /// The selected path has no file name component.
    #[error("no usable file name in path: {path}")]
    InvalidFileName {
        /// The offending path.
        path: String,
    },

    /// The file's extension is not in the allow-list.
    #[error("File type not allowed. Supported types: {}", allowed_types_list())]
    DisallowedExtension,

    /// An upload is already in flight; the call was rejected, not queued.
    #[error("an upload is already in progress")]
    AlreadyUploading,

    /// The transfer itself failed.
    #[error("Error uploading file: {0}")]
    Transfer(#[from] docdrop_client::Error),
}

/// The allow-list as users see it: dotted, comma-separated.
fn allowed_types_list() -> String {
    ALLOWED_EXTENSIONS.map(|ext| format!(".{ext}")).join(", ")
}

/// The file currently staged for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Where the content lives on disk.
    pub path: PathBuf,
    /// Display name sent to the store.
    pub file_name: String,
}

#[derive(Debug, Default)]
struct UploadState {
    selected_file: Option<SelectedFile>,
    error_message: Option<String>,
    success_message: Option<String>,
}

/// Controller for the upload workflow.
///
/// State machine: idle → ready (file selected) → uploading → idle on
/// success or back to ready on failure, so a failed upload can be
/// retried without re-selecting.
#[derive(Debug)]
pub struct UploadController {
    client: DocdropClient,
    events: UploadEvents,
    state: RwLock<UploadState>,
    is_uploading: AtomicBool,
    progress_tx: watch::Sender<u8>,
}

impl UploadController {
    /// Create a controller that announces uploads on `events`.
    pub fn new(client: DocdropClient, events: UploadEvents) -> Self {
        let (progress_tx, _) = watch::channel(0);
        Self {
            client,
            events,
            state: RwLock::new(UploadState::default()),
            is_uploading: AtomicBool::new(false),
            progress_tx,
        }
    }

    /// Stage a file for upload.
    ///
    /// The extension (after the last `.`, case-insensitive) must be in
    /// the allow-list; otherwise nothing stays selected and the recorded
    /// error names the allowed set.
    pub async fn select_file(&self, path: impl AsRef<Path>) -> Result<(), UploadError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(OsStr::to_str)
            .map(ToString::to_string);

        let mut state = self.state.write().await;
        let Some(file_name) = file_name else {
            state.selected_file = None;
            let err = UploadError::InvalidFileName {
                path: path.display().to_string(),
            };
            state.error_message = Some(err.to_string());
            return Err(err);
        };

        if extension_allowed(&file_name) {
            state.selected_file = Some(SelectedFile {
                path: path.to_path_buf(),
                file_name,
            });
            state.error_message = None;
            Ok(())
        } else {
            state.selected_file = None;
            let err = UploadError::DisallowedExtension;
            state.error_message = Some(err.to_string());
            Err(err)
        }
    }

    /// Upload the staged file.
    ///
    /// Fails fast when nothing is selected, and rejects (never queues)
    /// a call while another upload is in flight. Progress moves with the
    /// bytes handed to the transport; success pins it at 100, failure
    /// resets it to 0. `DocumentEvent::Uploaded` is emitted only on
    /// success.
    pub async fn upload(&self) -> Result<(), UploadError> {
        let selected = { self.state.read().await.selected_file.clone() };
        let Some(file) = selected else {
            let err = UploadError::NoFileSelected;
            self.state.write().await.error_message = Some(err.to_string());
            return Err(err);
        };

        if self.is_uploading.swap(true, Ordering::SeqCst) {
            return Err(UploadError::AlreadyUploading);
        }

        {
            let mut state = self.state.write().await;
            state.error_message = None;
            state.success_message = None;
        }
        let _ = self.progress_tx.send(0);

        // Bridge raw byte snapshots from the client into 0-100 percent.
        let (raw_tx, mut raw_rx) = watch::channel(UploadProgress::default());
        let percent_tx = self.progress_tx.clone();
        let forward = tokio::spawn(async move {
            while raw_rx.changed().await.is_ok() {
                let percent = raw_rx.borrow_and_update().percent();
                let _ = percent_tx.send(percent);
            }
        });

        let result = self.client.upload_path(&file.path, Some(raw_tx)).await;

        // The raw sender is gone once the transfer settles, so the
        // bridge drains fully before the final progress value is pinned.
        let _ = forward.await;

        let outcome = match result {
            Ok(payload) => {
                tracing::debug!(file = %file.file_name, "upload accepted: {payload}");
                let _ = self.progress_tx.send(100);
                let mut state = self.state.write().await;
                state.success_message = Some(format!("{} uploaded successfully!", file.file_name));
                state.selected_file = None;
                self.events.emit(DocumentEvent::Uploaded);
                Ok(())
            }
            Err(error) => {
                let err = UploadError::from(error);
                let _ = self.progress_tx.send(0);
                self.state.write().await.error_message = Some(err.to_string());
                Err(err)
            }
        };

        self.is_uploading.store(false, Ordering::SeqCst);
        outcome
    }

    /// Observe upload progress as a 0–100 percentage.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress_tx.subscribe()
    }

    /// The staged file, if any.
    pub async fn selected_file(&self) -> Option<SelectedFile> {
        self.state.read().await.selected_file.clone()
    }

    /// The last recorded error message.
    pub async fn error_message(&self) -> Option<String> {
        self.state.read().await.error_message.clone()
    }

    /// The last recorded success message.
    pub async fn success_message(&self) -> Option<String> {
        self.state.read().await.success_message.clone()
    }

    /// Whether an upload is in flight.
    pub fn is_uploading(&self) -> bool {
        self.is_uploading.load(Ordering::SeqCst)
    }
}
