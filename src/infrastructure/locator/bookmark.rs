//! Path bookmark locator
//!
//! The durable handle is a base64-encoded JSON bookmark carrying the
//! canonical absolute path. Resolution succeeds only while that path exists.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::application::ports::{FileLocator, LocatorError};
use crate::domain::history::Locator;

/// Bookmark format version
const BOOKMARK_VERSION: u8 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Bookmark {
    v: u8,
    path: PathBuf,
}

/// Locator backed by canonical path bookmarks
#[derive(Debug, Clone, Copy, Default)]
pub struct BookmarkLocator;

impl BookmarkLocator {
    /// Create a new bookmark locator
    pub fn new() -> Self {
        Self
    }

    fn decode(locator: &Locator) -> Option<Bookmark> {
        let bytes = STANDARD.decode(locator.as_str()).ok()?;
        let bookmark: Bookmark = serde_json::from_slice(&bytes).ok()?;
        (bookmark.v == BOOKMARK_VERSION).then_some(bookmark)
    }
}

impl FileLocator for BookmarkLocator {
    fn acquire(&self, path: &Path) -> Result<Locator, LocatorError> {
        let canonical = std::fs::canonicalize(path).map_err(|e| LocatorError::Inaccessible {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let bookmark = Bookmark {
            v: BOOKMARK_VERSION,
            path: canonical,
        };
        let json =
            serde_json::to_vec(&bookmark).map_err(|e| LocatorError::EncodeFailed(e.to_string()))?;

        Ok(Locator::new(STANDARD.encode(json)))
    }

    fn resolve(&self, locator: &Locator) -> Option<PathBuf> {
        let bookmark = Self::decode(locator)?;
        std::fs::canonicalize(&bookmark.path).ok()
    }
}
