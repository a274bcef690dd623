//! Clipboard port interface

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::clipboard::{ChangeCount, ClipboardContent};

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("{0} not found. Please install wl-clipboard.")]
    ToolNotFound(&'static str),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to copy to clipboard: {0}")]
    CopyFailed(String),
}

/// Port for the shared OS clipboard.
///
/// There is exactly one clipboard per session; every adapter talks to that
/// same resource, so callers must serialize their own read-modify-write.
#[async_trait]
pub trait SystemClipboard: Send + Sync {
    /// Current generation token. Changes whenever the clipboard is written.
    async fn change_count(&self) -> Result<ChangeCount, ClipboardError>;

    /// Read the current content as one of the three disjoint outcomes.
    async fn read(&self) -> Result<ClipboardContent, ClipboardError>;

    /// Replace the clipboard content with plain text.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Replace the clipboard content with a file reference.
    async fn write_file(&self, path: &Path) -> Result<(), ClipboardError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl SystemClipboard for Box<dyn SystemClipboard> {
    async fn change_count(&self) -> Result<ChangeCount, ClipboardError> {
        self.as_ref().change_count().await
    }

    async fn read(&self) -> Result<ClipboardContent, ClipboardError> {
        self.as_ref().read().await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().write_text(text).await
    }

    async fn write_file(&self, path: &Path) -> Result<(), ClipboardError> {
        self.as_ref().write_file(path).await
    }
}

#[async_trait]
impl<T: SystemClipboard + ?Sized> SystemClipboard for Arc<T> {
    async fn change_count(&self) -> Result<ChangeCount, ClipboardError> {
        self.as_ref().change_count().await
    }

    async fn read(&self) -> Result<ClipboardContent, ClipboardError> {
        self.as_ref().read().await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().write_text(text).await
    }

    async fn write_file(&self, path: &Path) -> Result<(), ClipboardError> {
        self.as_ref().write_file(path).await
    }
}
