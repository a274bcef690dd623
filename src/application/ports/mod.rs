//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;
pub mod locator;
pub mod repository;

// Re-export common types
pub use clipboard::{ClipboardError, SystemClipboard};
pub use config::ConfigStore;
pub use locator::{FileLocator, LocatorError};
pub use repository::{HistoryRepository, PersistenceError};
