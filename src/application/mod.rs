//! Application layer - Use cases and port interfaces
//!
//! Contains the clipboard history engine and trait definitions
//! for external system interactions.

pub mod classifier;
pub mod detector;
pub mod history;
pub mod ports;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

// Re-export use cases
pub use classifier::ContentClassifier;
pub use detector::{ChangeDetector, Observation};
pub use history::{
    ClipboardHistoryUseCase, HistoryError, HistoryItem, HistoryStatus, TickOutcome,
};
