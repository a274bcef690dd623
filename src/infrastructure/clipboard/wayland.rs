//! Wayland clipboard adapter using wl-clipboard (wl-paste / wl-copy)
//!
//! Unlike the arboard adapter this one sees real `text/uri-list` offers, so
//! files copied from a file manager are recognized as files.

use std::io;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{ClipboardError, SystemClipboard};
use crate::domain::clipboard::{ChangeCount, ClipboardContent};

use super::tracker::ChangeTracker;
use super::uri::{parse_uri_list, to_file_uri};

const URI_LIST: &str = "text/uri-list";

fn spawn_error(tool: &'static str, e: io::Error, wrap: fn(String) -> ClipboardError) -> ClipboardError {
    if e.kind() == io::ErrorKind::NotFound {
        ClipboardError::ToolNotFound(tool)
    } else {
        wrap(e.to_string())
    }
}

/// Pick the richest representation from the offered MIME types
fn preferred_type(types: &str) -> Option<&'static str> {
    let offered: Vec<&str> = types.lines().map(str::trim).collect();
    if offered.contains(&URI_LIST) {
        Some(URI_LIST)
    } else if offered
        .iter()
        .any(|t| t.starts_with("text/plain") || *t == "TEXT" || *t == "STRING" || *t == "UTF8_STRING")
    {
        Some("text")
    } else {
        None
    }
}

/// Wayland clipboard adapter using wl-clipboard
pub struct WaylandClipboard {
    tracker: ChangeTracker,
}

impl WaylandClipboard {
    /// Create a new Wayland clipboard adapter
    pub fn new() -> Self {
        Self {
            tracker: ChangeTracker::new(),
        }
    }

    /// Run wl-paste; `None` when the selection is empty
    async fn paste(&self, args: &[&str]) -> Result<Option<String>, ClipboardError> {
        let output = Command::new("wl-paste")
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| spawn_error("wl-paste", e, ClipboardError::ReadFailed))?;

        // wl-paste exits non-zero when nothing is offered
        if !output.status.success() {
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }

    async fn read_content(&self) -> Result<ClipboardContent, ClipboardError> {
        let Some(types) = self.paste(&["--list-types"]).await? else {
            return Ok(ClipboardContent::Empty);
        };

        match preferred_type(&types) {
            Some(URI_LIST) => {
                let payload = self.paste(&["--no-newline", "--type", URI_LIST]).await?;
                Ok(match payload.as_deref().and_then(parse_uri_list) {
                    Some(path) => ClipboardContent::File(path),
                    None => ClipboardContent::Empty,
                })
            }
            Some(_) => {
                let text = self.paste(&["--no-newline", "--type", "text"]).await?;
                Ok(text.map_or(ClipboardContent::Empty, ClipboardContent::Text))
            }
            None => Ok(ClipboardContent::Empty),
        }
    }

    async fn copy(&self, payload: &str, mime: Option<&str>) -> Result<(), ClipboardError> {
        let mut command = Command::new("wl-copy");
        if let Some(mime) = mime {
            command.args(["--type", mime]);
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error("wl-copy", e, ClipboardError::CopyFailed))?;

        // Write payload to stdin
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(payload.as_bytes())
                .await
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;
        }

        // Wait for process to complete
        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;

        if !status.success() {
            return Err(ClipboardError::CopyFailed(format!(
                "wl-copy exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}

impl Default for WaylandClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemClipboard for WaylandClipboard {
    async fn change_count(&self) -> Result<ChangeCount, ClipboardError> {
        let content = self.read_content().await?;
        Ok(self.tracker.observe(&content))
    }

    async fn read(&self) -> Result<ClipboardContent, ClipboardError> {
        self.read_content().await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.copy(text, None).await
    }

    async fn write_file(&self, path: &Path) -> Result<(), ClipboardError> {
        let payload = format!("{}\r\n", to_file_uri(path));
        self.copy(&payload, Some(URI_LIST)).await
    }
}
