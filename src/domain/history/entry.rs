//! History entry value objects

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Opaque, durable handle to a file.
///
/// Produced and interpreted only by a `FileLocator` adapter; the domain never
/// looks inside. Two locators for the same file may differ byte-wise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator(String);

impl Locator {
    /// Wrap an already-encoded locator blob
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded blob
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A copied file, identified by its resolved absolute path.
///
/// `locator` is `None` when no durable handle could be acquired at copy time;
/// such a reference lives only for the current session.
#[derive(Debug, Clone)]
pub struct FileReference {
    path: PathBuf,
    locator: Option<Locator>,
}

impl FileReference {
    /// Reference with a durable locator
    pub fn new(path: impl Into<PathBuf>, locator: Locator) -> Self {
        Self {
            path: path.into(),
            locator: Some(locator),
        }
    }

    /// Reference without a durable locator
    pub fn unlocated(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            locator: None,
        }
    }

    /// Resolved path (also the display path)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durable locator, if one was acquired
    pub fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    /// Whether this reference can survive a restart
    pub fn is_durable(&self) -> bool {
        self.locator.is_some()
    }

    /// File name for display, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

// Identity is the resolved path; the locator is not part of it.
impl PartialEq for FileReference {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for FileReference {}

impl Hash for FileReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Entry variant tag, as used in the persisted record and the display layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Text,
    File,
}

impl EntryKind {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::File => "file",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One unit of clipboard history.
///
/// Equality is the deduplication identity: variant tag plus resolved value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entry {
    Text(String),
    File(FileReference),
}

impl Entry {
    /// Convenience constructor for text entries
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Variant tag
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Text(_) => EntryKind::Text,
            Self::File(_) => EntryKind::File,
        }
    }

    /// Label shown by the display layer
    pub fn label(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::File(file) => file.display_name(),
        }
    }

    /// Text value, if this is a text entry
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::File(_) => None,
        }
    }

    /// File reference, if this is a file entry
    pub fn as_file(&self) -> Option<&FileReference> {
        match self {
            Self::Text(_) => None,
            Self::File(file) => Some(file),
        }
    }
}
