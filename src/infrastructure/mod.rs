//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the OS clipboard, the filesystem and XDG config.

pub mod clipboard;
pub mod config;
pub mod locator;
pub mod persistence;

// Re-export adapters
pub use clipboard::{create_clipboard, ArboardClipboard, ClipboardBackend, WaylandClipboard};
pub use config::XdgConfigStore;
pub use locator::BookmarkLocator;
pub use persistence::{default_history_path, JsonHistoryFile};
