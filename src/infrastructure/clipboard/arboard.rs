//! Cross-platform clipboard adapter using arboard
//!
//! Works on Windows, macOS, and Linux (X11/Wayland). arboard only exchanges
//! text here, so file references travel as `file://` URI lines.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::ports::{ClipboardError, SystemClipboard};
use crate::domain::clipboard::{ChangeCount, ClipboardContent};

use super::tracker::ChangeTracker;
use super::uri::{parse_uri_list, to_file_uri};

type SharedHandle = Arc<Mutex<Option<arboard::Clipboard>>>;

/// Cross-platform clipboard adapter using arboard
pub struct ArboardClipboard {
    // Kept alive between calls: on X11 the owner must outlive the write.
    handle: SharedHandle,
    tracker: ChangeTracker,
}

impl ArboardClipboard {
    /// Create a new arboard clipboard adapter
    pub fn new() -> Self {
        Self {
            handle: Arc::new(Mutex::new(None)),
            tracker: ChangeTracker::new(),
        }
    }

    /// Run `f` on the shared arboard handle in a blocking task
    async fn with_clipboard<T, F>(&self, f: F) -> Result<T, ClipboardError>
    where
        T: Send + 'static,
        F: FnOnce(&mut arboard::Clipboard) -> Result<T, ClipboardError> + Send + 'static,
    {
        let handle = Arc::clone(&self.handle);

        // arboard operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut guard = handle.lock().unwrap_or_else(|e| e.into_inner());
            if guard.is_none() {
                let clipboard = arboard::Clipboard::new()
                    .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;
                *guard = Some(clipboard);
            }
            match guard.as_mut() {
                Some(clipboard) => f(clipboard),
                None => Err(ClipboardError::ClipboardUnavailable(
                    "clipboard handle missing".to_string(),
                )),
            }
        })
        .await
        .map_err(|e| ClipboardError::ReadFailed(format!("Task join error: {}", e)))?
    }

    async fn read_content(&self) -> Result<ClipboardContent, ClipboardError> {
        self.with_clipboard(|clipboard| match clipboard.get_text() {
            Ok(text) => Ok(match parse_uri_list(&text) {
                Some(path) => ClipboardContent::File(path),
                None => ClipboardContent::Text(text),
            }),
            Err(arboard::Error::ContentNotAvailable) => Ok(ClipboardContent::Empty),
            Err(e) => Err(ClipboardError::ReadFailed(e.to_string())),
        })
        .await
    }

    async fn set_text(&self, text: String) -> Result<(), ClipboardError> {
        self.with_clipboard(move |clipboard| {
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
        })
        .await
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemClipboard for ArboardClipboard {
    async fn change_count(&self) -> Result<ChangeCount, ClipboardError> {
        let content = self.read_content().await?;
        Ok(self.tracker.observe(&content))
    }

    async fn read(&self) -> Result<ClipboardContent, ClipboardError> {
        self.read_content().await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.set_text(text.to_owned()).await
    }

    async fn write_file(&self, path: &Path) -> Result<(), ClipboardError> {
        self.set_text(to_file_uri(path)).await
    }
}
