//! Domain layer - Core business logic
//!
//! Contains value objects, the history store, and domain errors.
//! This layer has no dependencies on external systems.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod history;
pub mod polling;

// Re-export common types
pub use clipboard::{ChangeCount, ClipboardContent};
pub use config::AppConfig;
pub use error::*;
pub use history::{Entry, EntryKind, FileReference, HistoryStore, Locator, DEFAULT_CAPACITY};
pub use polling::PollInterval;
