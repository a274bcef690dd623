//! JSON history file adapter
//!
//! The file holds an array of `{"type": "text"|"file", "value": ...}`
//! records, most recent first, and is fully rewritten on every save.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::application::ports::{FileLocator, HistoryRepository, PersistenceError};
use crate::domain::history::{Entry, EntryKind, FileReference, Locator};

/// Default history file location under the platform data directory
pub fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("clipkeep")
        .join("history.json")
}

/// Persisted form of one entry. For files, `value` is the encoded locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct EntryRecord {
    #[serde(rename = "type")]
    kind: EntryKind,
    value: String,
}

/// History repository backed by a single JSON file
pub struct JsonHistoryFile<L: FileLocator> {
    path: PathBuf,
    locator: L,
}

impl<L: FileLocator> JsonHistoryFile<L> {
    /// Create a repository at the default location
    pub fn new(locator: L) -> Self {
        Self::with_path(default_history_path(), locator)
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>, locator: L) -> Self {
        Self {
            path: path.into(),
            locator,
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Convert entries to records.
    ///
    /// File entries without a durable locator cannot be restored after a
    /// restart and are left out; the skipped count is returned.
    fn encode_records(entries: &[Entry]) -> (Vec<EntryRecord>, usize) {
        let mut skipped = 0;
        let records = entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Text(value) => Some(EntryRecord {
                    kind: EntryKind::Text,
                    value: value.clone(),
                }),
                Entry::File(file) => match file.locator() {
                    Some(locator) => Some(EntryRecord {
                        kind: EntryKind::File,
                        value: locator.as_str().to_string(),
                    }),
                    None => {
                        skipped += 1;
                        None
                    }
                },
            })
            .collect();
        (records, skipped)
    }

    /// Convert records back to entries, dropping unresolvable file records.
    fn decode_records(&self, records: Vec<EntryRecord>) -> (Vec<Entry>, usize) {
        let mut dropped = 0;
        let entries = records
            .into_iter()
            .filter_map(|record| match record.kind {
                EntryKind::Text => Some(Entry::Text(record.value)),
                EntryKind::File => {
                    let locator = Locator::new(record.value);
                    match self.locator.resolve(&locator) {
                        Some(path) => Some(Entry::File(FileReference::new(path, locator))),
                        None => {
                            dropped += 1;
                            None
                        }
                    }
                }
            })
            .collect();
        (entries, dropped)
    }

    fn location_string(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

#[async_trait]
impl<L: FileLocator> HistoryRepository for JsonHistoryFile<L> {
    async fn load(&self) -> Result<Vec<Entry>, PersistenceError> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| PersistenceError::ReadFailed(e.to_string()))?;

        let records: Vec<EntryRecord> = serde_json::from_str(&content)
            .map_err(|e| PersistenceError::ParseFailed(e.to_string()))?;

        let (entries, dropped) = self.decode_records(records);
        if dropped > 0 {
            tracing::warn!(
                dropped,
                path = %self.path.display(),
                "dropped file entries that no longer resolve"
            );
        }

        Ok(entries)
    }

    async fn save(&self, entries: &[Entry]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PersistenceError::WriteFailed(e.to_string()))?;
        }

        let (records, skipped) = Self::encode_records(entries);
        if skipped > 0 {
            tracing::debug!(skipped, "not persisting file entries without a locator");
        }

        let content = serde_json::to_string_pretty(&records)
            .map_err(|e| PersistenceError::WriteFailed(e.to_string()))?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| PersistenceError::WriteFailed(e.to_string()))?;

        Ok(())
    }

    fn location(&self) -> String {
        self.location_string()
    }
}
