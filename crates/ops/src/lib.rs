//! Session layer for the docdrop CLI.
//!
//! Wraps [`docdrop_client::DocdropClient`] with the two stateful
//! controllers the shell composes (the document list presenter and the
//! upload controller), plus configuration management and the typed
//! upload-event bus that decouples them.

mod config;
mod error;
mod events;
mod list;
mod upload;

pub use config::OpsConfig;
pub use error::OpsError;
pub use events::{DocumentEvent, UploadEvents};
pub use list::{DocumentList, LOAD_ERROR_MESSAGE, SavedDocument};
pub use upload::{SelectedFile, UploadController, UploadError};

/// Re-export client and core types for consumers.
pub use docdrop_client;
pub use docdrop_core;
