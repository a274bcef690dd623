//! History persistence infrastructure module

mod json_file;

pub use json_file::{default_history_path, JsonHistoryFile};
