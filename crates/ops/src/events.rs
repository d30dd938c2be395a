//! Typed upload-event bus.
//!
//! Explicit subscription interface between the upload side and anything
//! that wants to refresh on new documents: the upload controller emits,
//! collaborators subscribe.

use tokio::sync::broadcast;

/// Events announced on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// A document finished uploading; listings are stale.
    Uploaded,
}

/// Broadcast channel for [`DocumentEvent`]s.
///
/// Cloning shares the underlying channel. Emitting with no subscribers
/// is fine; events are fire-and-forget.
#[derive(Debug, Clone)]
pub struct UploadEvents {
    tx: broadcast::Sender<DocumentEvent>,
}

impl UploadEvents {
    /// Create a new bus.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Subscribe to events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<DocumentEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all current subscribers (fire-and-forget).
    pub fn emit(&self, event: DocumentEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for UploadEvents {
    fn default() -> Self {
        Self::new()
    }
}
