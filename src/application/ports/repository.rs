//! History persistence port interface

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::history::Entry;

/// Persistence errors
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    #[error("Failed to read history file: {0}")]
    ReadFailed(String),

    #[error("Failed to parse history file: {0}")]
    ParseFailed(String),

    #[error("Failed to write history file: {0}")]
    WriteFailed(String),
}

/// Port for durable history storage
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Load the persisted history, most recent first.
    ///
    /// A missing backing file yields an empty sequence. File references whose
    /// locator no longer resolves are omitted, not reported.
    async fn load(&self) -> Result<Vec<Entry>, PersistenceError>;

    /// Overwrite the persisted history with `entries`.
    async fn save(&self, entries: &[Entry]) -> Result<(), PersistenceError>;

    /// Human-readable location of the backing store, for logs
    fn location(&self) -> String;
}

#[async_trait]
impl<T: HistoryRepository + ?Sized> HistoryRepository for Arc<T> {
    async fn load(&self) -> Result<Vec<Entry>, PersistenceError> {
        self.as_ref().load().await
    }

    async fn save(&self, entries: &[Entry]) -> Result<(), PersistenceError> {
        self.as_ref().save(entries).await
    }

    fn location(&self) -> String {
        self.as_ref().location()
    }
}
