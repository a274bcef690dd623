//! Raw clipboard observations

mod content;

pub use content::{ChangeCount, ClipboardContent};
