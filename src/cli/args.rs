//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::config::AppConfig;
use crate::domain::polling::PollInterval;
use crate::infrastructure::clipboard::ClipboardBackend;

/// clipkeep - clipboard history with deduplication and restore
#[derive(Parser, Debug)]
#[command(name = "clipkeep")]
#[command(version)]
#[command(about = "Clipboard history daemon with deduplication, persistence and restore")]
#[command(long_about = None)]
pub struct Cli {
    /// Run the clipboard watcher (control via: clipkeep history list/restore/clear)
    #[arg(long)]
    pub daemon: bool,

    /// Maximum number of history entries
    #[arg(long, value_name = "N", global = true, value_parser = parse_capacity)]
    pub capacity: Option<usize>,

    /// Clipboard poll interval (e.g., 500ms, 1s, 2m)
    #[arg(long, value_name = "TIME", global = true, value_parser = parse_interval)]
    pub interval: Option<PollInterval>,

    /// Clipboard backend (auto, arboard, wayland)
    #[arg(long, value_name = "BACKEND", global = true, value_parser = parse_backend)]
    pub backend: Option<ClipboardBackend>,

    /// History file location
    #[arg(long, value_name = "PATH", global = true)]
    pub history_file: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show, restore or clear clipboard history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// History actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// List entries, most recent first
    List {
        /// Print the entries as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Put the entry at INDEX back on the clipboard
    Restore {
        /// Entry index as shown by `history list` (0 = most recent)
        index: usize,
    },
    /// Remove every entry
    Clear,
    /// Show whether a daemon is running and how full the history is
    Status,
}

impl Default for HistoryAction {
    fn default() -> Self {
        HistoryAction::List { json: false }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

impl Cli {
    /// Config layer made of the flags given on the command line
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            capacity: self.capacity,
            poll_interval: self.interval.map(|i| i.to_string()),
            backend: self.backend.map(|b| b.to_string()),
            history_file: self
                .history_file
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            log_level: None,
        }
    }
}

/// Resolved engine settings after merging every config layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub capacity: usize,
    pub interval: PollInterval,
    pub backend: ClipboardBackend,
    pub history_file: PathBuf,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "capacity",
    "poll_interval",
    "backend",
    "history_file",
    "log_level",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

/// Parse a capacity of at least one entry
pub fn parse_capacity(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("capacity must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a positive integer", value)),
    }
}

fn parse_interval(value: &str) -> Result<PollInterval, String> {
    value.parse::<PollInterval>().map_err(|e| e.to_string())
}

fn parse_backend(value: &str) -> Result<ClipboardBackend, String> {
    value.parse::<ClipboardBackend>().map_err(|e| e.to_string())
}
