//! Content classification: raw clipboard read -> typed history entry

use crate::domain::clipboard::ClipboardContent;
use crate::domain::history::{Entry, FileReference};

use super::ports::FileLocator;

/// Content classifier.
///
/// Priority: file reference, then non-blank text. Anything else is not
/// history material and yields `None`.
pub struct ContentClassifier<L: FileLocator> {
    locator: L,
}

impl<L: FileLocator> ContentClassifier<L> {
    /// Create a classifier that acquires locators through `locator`
    pub fn new(locator: L) -> Self {
        Self { locator }
    }

    /// The locator capability, shared with restore-time checks
    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Turn one clipboard read into a history entry
    pub fn classify(&self, content: ClipboardContent) -> Option<Entry> {
        match content {
            ClipboardContent::File(path) => {
                let reference = match self.locator.acquire(&path) {
                    Ok(locator) => {
                        let resolved = self
                            .locator
                            .resolve(&locator)
                            .unwrap_or_else(|| path.clone());
                        FileReference::new(resolved, locator)
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "no durable locator, file entry will not survive a restart"
                        );
                        FileReference::unlocated(path)
                    }
                };
                Some(Entry::File(reference))
            }
            ClipboardContent::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Entry::Text(trimmed.to_string()))
                }
            }
            ClipboardContent::Empty => None,
        }
    }
}
