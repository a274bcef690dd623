//! Clipboard infrastructure module
//!
//! Provides cross-platform clipboard support using arboard, with a
//! wl-clipboard adapter for Wayland sessions.

mod arboard;
mod factory;
mod tracker;
mod uri;
mod wayland;

pub use arboard::ArboardClipboard;
pub use factory::{create_clipboard, detect_backend, ClipboardBackend, ParseClipboardBackendError};
pub use tracker::ChangeTracker;
pub use uri::{parse_uri_list, to_file_uri};
pub use wayland::WaylandClipboard;
