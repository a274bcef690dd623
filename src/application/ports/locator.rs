//! File locator port interface

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::history::Locator;

/// Errors while acquiring a durable locator
#[derive(Debug, Clone, Error)]
pub enum LocatorError {
    #[error("File not accessible: {path}: {reason}")]
    Inaccessible { path: PathBuf, reason: String },

    #[error("Failed to encode locator: {0}")]
    EncodeFailed(String),
}

/// Capability that turns paths into durable handles and back.
///
/// All platform-specific mechanics (bookmarks, sandbox scopes, ...) live
/// behind this trait; the store and its dedup logic only see resolved paths.
pub trait FileLocator: Send + Sync {
    /// Capture a durable handle for `path`.
    fn acquire(&self, path: &Path) -> Result<Locator, LocatorError>;

    /// Resolve a handle back to an absolute path.
    ///
    /// Returns `None` when the target no longer exists or the handle is
    /// unreadable. Never panics on bad input.
    fn resolve(&self, locator: &Locator) -> Option<PathBuf>;
}

impl<L: FileLocator + ?Sized> FileLocator for std::sync::Arc<L> {
    fn acquire(&self, path: &Path) -> Result<Locator, LocatorError> {
        self.as_ref().acquire(path)
    }

    fn resolve(&self, locator: &Locator) -> Option<PathBuf> {
        self.as_ref().resolve(locator)
    }
}
