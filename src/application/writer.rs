//! Writing history entries back onto the OS clipboard

use std::path::PathBuf;

use crate::domain::history::Entry;

use super::ports::{ClipboardError, SystemClipboard};

/// Return the path of a file entry whose target is gone.
///
/// Text entries are always restorable.
pub async fn stale_target(entry: &Entry) -> Option<PathBuf> {
    let file = entry.as_file()?;
    match tokio::fs::try_exists(file.path()).await {
        Ok(true) => None,
        _ => Some(file.path().to_path_buf()),
    }
}

/// Put `entry` on the clipboard using the encoding of its variant
pub async fn write_entry<C>(clipboard: &C, entry: &Entry) -> Result<(), ClipboardError>
where
    C: SystemClipboard + ?Sized,
{
    match entry {
        Entry::Text(text) => clipboard.write_text(text).await,
        Entry::File(file) => clipboard.write_file(file.path()).await,
    }
}
