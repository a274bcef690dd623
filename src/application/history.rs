//! Clipboard history use case

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::history::{Entry, EntryKind, HistoryStore, Insertion};

use super::classifier::ContentClassifier;
use super::detector::{ChangeDetector, Observation};
use super::ports::{ClipboardError, FileLocator, HistoryRepository, SystemClipboard};
use super::writer;

/// Errors from the history use case
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("No history entry at index {index} (history has {len} entries)")]
    NoSuchEntry { index: usize, len: usize },

    #[error("File no longer exists: {}", .0.display())]
    StaleFile(PathBuf),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
}

/// One row of the history as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub index: usize,
    pub kind: EntryKind,
    pub label: String,
}

/// Size information for status queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStatus {
    pub len: usize,
    pub capacity: usize,
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clipboard unchanged since last tick
    Unchanged,
    /// Our own restore was skipped
    Suppressed,
    /// Clipboard changed to something that is not history material
    Ignored,
    /// Entry inserted or promoted to the front
    Recorded { entry: Entry, insertion: Insertion },
}

/// State mutated under the engine lock
struct EngineState {
    store: HistoryStore,
    detector: ChangeDetector,
}

/// Clipboard history use case.
///
/// All mutation (timer ticks, restores, clears) goes through one async mutex
/// around the store and the change detector, and every mutation is written to
/// the repository before the lock is released.
pub struct ClipboardHistoryUseCase<C, L, R>
where
    C: SystemClipboard,
    L: FileLocator,
    R: HistoryRepository,
{
    clipboard: C,
    classifier: ContentClassifier<L>,
    repository: R,
    state: Mutex<EngineState>,
}

impl<C, L, R> ClipboardHistoryUseCase<C, L, R>
where
    C: SystemClipboard,
    L: FileLocator,
    R: HistoryRepository,
{
    /// Create a new use case with an empty history of `capacity` entries.
    /// Call `initialize` to load persisted state.
    pub fn new(clipboard: C, locator: L, repository: R, capacity: usize) -> Self {
        Self {
            clipboard,
            classifier: ContentClassifier::new(locator),
            repository,
            state: Mutex::new(EngineState {
                store: HistoryStore::new(capacity),
                detector: ChangeDetector::new(),
            }),
        }
    }

    /// Replace the in-memory history with the persisted one.
    ///
    /// An unreadable history is logged and treated as empty. Returns the
    /// number of entries loaded.
    pub async fn load(&self) -> usize {
        let mut state = self.state.lock().await;
        let capacity = state.store.capacity();

        let loaded = match self.repository.load().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    location = %self.repository.location(),
                    error = %e,
                    "could not load history, starting empty"
                );
                Vec::new()
            }
        };
        state.store = HistoryStore::from_entries(loaded, capacity);

        tracing::debug!(
            entries = state.store.len(),
            capacity,
            location = %self.repository.location(),
            "history loaded"
        );
        state.store.len()
    }

    /// Load persisted history and prime the change detector, so content
    /// already on the clipboard is not recorded.
    ///
    /// Neither step is fatal: an unavailable clipboard leaves the detector
    /// unprimed and the first tick records the current content.
    pub async fn initialize(&self) -> usize {
        let loaded = self.load().await;

        let mut state = self.state.lock().await;
        if let Err(e) = state.detector.prime(&self.clipboard).await {
            tracing::warn!(error = %e, "could not read clipboard at startup");
        }
        loaded
    }

    /// Poll the clipboard once and record any new content.
    pub async fn tick(&self) -> Result<TickOutcome, HistoryError> {
        let mut state = self.state.lock().await;

        let content = match state.detector.poll(&self.clipboard).await? {
            Observation::Unchanged => return Ok(TickOutcome::Unchanged),
            Observation::Suppressed => {
                tracing::debug!("skipped clipboard change caused by restore");
                return Ok(TickOutcome::Suppressed);
            }
            Observation::Changed(content) => content,
        };

        let Some(entry) = self.classifier.classify(content) else {
            tracing::debug!("clipboard changed to unsupported or blank content");
            return Ok(TickOutcome::Ignored);
        };

        let insertion = state.store.insert_or_promote(entry.clone());
        tracing::info!(
            kind = %entry.kind(),
            promoted_from = ?insertion.promoted_from,
            evicted = insertion.evicted.is_some(),
            "recorded clipboard entry"
        );
        self.persist(&state.store).await;

        Ok(TickOutcome::Recorded { entry, insertion })
    }

    /// Restore the entry at `index` (0 = most recent) onto the clipboard.
    pub async fn restore(&self, index: usize) -> Result<Entry, HistoryError> {
        let mut state = self.state.lock().await;
        let entry = state
            .store
            .get(index)
            .cloned()
            .ok_or(HistoryError::NoSuchEntry {
                index,
                len: state.store.len(),
            })?;

        self.restore_locked(&mut state, entry.clone()).await?;
        Ok(entry)
    }

    /// Put `entry` on the clipboard and move it to the front of the history.
    ///
    /// A file entry whose target is gone is rejected and the history is left
    /// untouched.
    pub async fn restore_entry(&self, entry: Entry) -> Result<(), HistoryError> {
        let mut state = self.state.lock().await;
        self.restore_locked(&mut state, entry).await
    }

    async fn restore_locked(
        &self,
        state: &mut EngineState,
        entry: Entry,
    ) -> Result<(), HistoryError> {
        if let Some(path) = writer::stale_target(&entry).await {
            tracing::warn!(path = %path.display(), "not restoring missing file");
            return Err(HistoryError::StaleFile(path));
        }

        // Armed before the write so the next poll always sees it.
        state.detector.arm_suppression();
        if let Err(e) = writer::write_entry(&self.clipboard, &entry).await {
            state.detector.disarm_suppression();
            return Err(e.into());
        }

        let insertion = state.store.insert_or_promote(entry);
        tracing::info!(promoted_from = ?insertion.promoted_from, "restored clipboard entry");
        self.persist(&state.store).await;
        Ok(())
    }

    /// Remove every entry and persist the empty history.
    pub async fn clear(&self) -> usize {
        let mut state = self.state.lock().await;
        let removed = state.store.clear();
        tracing::info!(removed, "history cleared");
        self.persist(&state.store).await;
        removed
    }

    /// Display rows, most recent first
    pub async fn history(&self) -> Vec<HistoryItem> {
        let snapshot = self.snapshot().await;
        snapshot
            .iter()
            .enumerate()
            .map(|(index, entry)| HistoryItem {
                index,
                kind: entry.kind(),
                label: entry.label(),
            })
            .collect()
    }

    /// Shared view of the current entries
    pub async fn snapshot(&self) -> Arc<Vec<Entry>> {
        self.state.lock().await.store.snapshot()
    }

    /// Current size and capacity
    pub async fn status(&self) -> HistoryStatus {
        let state = self.state.lock().await;
        HistoryStatus {
            len: state.store.len(),
            capacity: state.store.capacity(),
        }
    }

    /// Write-through; failures leave the in-memory store authoritative.
    async fn persist(&self, store: &HistoryStore) {
        if let Err(e) = self.repository.save(store.entries()).await {
            tracing::warn!(
                location = %self.repository.location(),
                error = %e,
                "could not save history, changes will not survive a restart"
            );
        }
    }
}
