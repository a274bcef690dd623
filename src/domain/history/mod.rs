//! Clipboard history: typed entries and the bounded MRU store

mod entry;
mod store;

pub use entry::{Entry, EntryKind, FileReference, Locator};
pub use store::{HistoryStore, Insertion, DEFAULT_CAPACITY};
