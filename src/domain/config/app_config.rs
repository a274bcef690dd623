//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::history::DEFAULT_CAPACITY;
use crate::domain::polling::PollInterval;

/// Clipboard back end used when none is configured
pub const DEFAULT_BACKEND: &str = "auto";

/// Log filter used when none is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub capacity: Option<usize>,
    pub poll_interval: Option<String>,
    pub backend: Option<String>,
    pub history_file: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Create config with default values.
    ///
    /// `history_file` and `log_level` stay unset: the history default depends
    /// on the platform data directory and the log default on the command.
    pub fn defaults() -> Self {
        Self {
            capacity: Some(DEFAULT_CAPACITY),
            poll_interval: Some(PollInterval::default().to_string()),
            backend: Some(DEFAULT_BACKEND.to_string()),
            history_file: None,
            log_level: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            capacity: other.capacity.or(self.capacity),
            poll_interval: other.poll_interval.or(self.poll_interval),
            backend: other.backend.or(self.backend),
            history_file: other.history_file.or(self.history_file),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Get capacity, or the default if not set or zero
    pub fn capacity_or_default(&self) -> usize {
        self.capacity.filter(|c| *c > 0).unwrap_or(DEFAULT_CAPACITY)
    }

    /// Get poll interval as parsed value, or default if not set/invalid
    pub fn poll_interval_or_default(&self) -> PollInterval {
        self.poll_interval
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get backend preference, or "auto" if not set
    pub fn backend_or_default(&self) -> &str {
        self.backend.as_deref().unwrap_or(DEFAULT_BACKEND)
    }

    /// Get configured history file path, if any
    pub fn history_file_path(&self) -> Option<PathBuf> {
        self.history_file
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Get log filter, or "info" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
