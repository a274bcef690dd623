//! In-memory port implementations for unit tests

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::clipboard::{ChangeCount, ClipboardContent};
use crate::domain::history::{Entry, Locator};

use super::ports::{
    ClipboardError, FileLocator, HistoryRepository, LocatorError, PersistenceError,
    SystemClipboard,
};

/// Clipboard holding one content value and a generation counter
#[derive(Default)]
pub struct FakeClipboard {
    state: Mutex<(ClipboardContent, ChangeCount)>,
    fail_writes: AtomicBool,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::new();
        clipboard.copy_text(text);
        clipboard
    }

    /// Simulate another application writing content
    pub fn set_content(&self, content: ClipboardContent) {
        let mut state = self.state.lock().unwrap();
        state.0 = content;
        state.1 += 1;
    }

    pub fn copy_text(&self, text: &str) {
        self.set_content(ClipboardContent::Text(text.to_string()));
    }

    pub fn copy_file(&self, path: impl Into<PathBuf>) {
        self.set_content(ClipboardContent::File(path.into()));
    }

    pub fn content(&self) -> ClipboardContent {
        self.state.lock().unwrap().0.clone()
    }

    pub fn generation(&self) -> ChangeCount {
        self.state.lock().unwrap().1
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn write(&self, content: ClipboardContent) -> Result<(), ClipboardError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ClipboardError::CopyFailed("injected failure".into()));
        }
        self.set_content(content);
        Ok(())
    }
}

#[async_trait]
impl SystemClipboard for FakeClipboard {
    async fn change_count(&self) -> Result<ChangeCount, ClipboardError> {
        Ok(self.generation())
    }

    async fn read(&self) -> Result<ClipboardContent, ClipboardError> {
        Ok(self.content())
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.write(ClipboardContent::Text(text.to_string()))
    }

    async fn write_file(&self, path: &Path) -> Result<(), ClipboardError> {
        self.write(ClipboardContent::File(path.to_path_buf()))
    }
}

/// Locator that encodes the path verbatim; paths can be marked missing
#[derive(Default)]
pub struct FakeLocator {
    missing: Mutex<HashSet<PathBuf>>,
    fail_acquire: AtomicBool,
}

impl FakeLocator {
    const PREFIX: &'static str = "fake:";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_acquire(&self, fail: bool) {
        self.fail_acquire.store(fail, Ordering::SeqCst);
    }

    pub fn mark_missing(&self, path: impl Into<PathBuf>) {
        self.missing.lock().unwrap().insert(path.into());
    }
}

impl FileLocator for FakeLocator {
    fn acquire(&self, path: &Path) -> Result<Locator, LocatorError> {
        if self.fail_acquire.load(Ordering::SeqCst) {
            return Err(LocatorError::Inaccessible {
                path: path.to_path_buf(),
                reason: "injected failure".into(),
            });
        }
        Ok(Locator::new(format!("{}{}", Self::PREFIX, path.display())))
    }

    fn resolve(&self, locator: &Locator) -> Option<PathBuf> {
        let path = PathBuf::from(locator.as_str().strip_prefix(Self::PREFIX)?);
        if self.missing.lock().unwrap().contains(&path) {
            None
        } else {
            Some(path)
        }
    }
}

/// Repository keeping the last saved sequence in memory
#[derive(Default)]
pub struct MemoryRepository {
    entries: Mutex<Vec<Entry>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
    fail_loads: AtomicBool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let repository = Self::new();
        *repository.entries.lock().unwrap() = entries;
        repository
    }

    pub fn saved(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl HistoryRepository for MemoryRepository {
    async fn load(&self) -> Result<Vec<Entry>, PersistenceError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(PersistenceError::ReadFailed("injected failure".into()));
        }
        Ok(self.saved())
    }

    async fn save(&self, entries: &[Entry]) -> Result<(), PersistenceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistenceError::WriteFailed("injected failure".into()));
        }
        *self.entries.lock().unwrap() = entries.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
