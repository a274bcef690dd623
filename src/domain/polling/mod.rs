//! Clipboard polling value objects

mod interval;

pub use interval::{PollInterval, DEFAULT_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS};
