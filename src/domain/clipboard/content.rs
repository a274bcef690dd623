//! Clipboard content as read from the OS, before classification

use std::path::PathBuf;

/// Generation token of the OS clipboard.
///
/// Any value different from the last observed one means the clipboard was
/// written since. Only equality is meaningful.
pub type ChangeCount = u64;

/// One read of the OS clipboard.
///
/// The three variants are disjoint: a read that carries a file reference is
/// reported as `File` even if the platform also offers a textual rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ClipboardContent {
    /// Nothing usable (empty clipboard, images, rich text only, ...)
    #[default]
    Empty,
    /// Plain text, untrimmed
    Text(String),
    /// A file-system reference
    File(PathBuf),
}

impl ClipboardContent {
    /// Check if the read carried nothing usable
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
