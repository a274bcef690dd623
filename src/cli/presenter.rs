//! CLI presenter for output formatting

use colored::*;

use crate::application::HistoryItem;
use crate::domain::history::EntryKind;

/// Longest label shown in the history listing
const MAX_LABEL_CHARS: usize = 72;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print daemon status
    pub fn daemon_status(&self, state: &str) {
        eprintln!("{} Daemon: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print the history, one entry per line, or a note when it is empty
    pub fn history(&self, items: &[HistoryItem]) {
        if items.is_empty() {
            self.info("History is empty");
            return;
        }
        for item in items {
            println!("{}", format_item(item));
        }
    }

    /// Print the history as a JSON array
    pub fn history_json(&self, items: &[HistoryItem]) -> Result<(), String> {
        let json = serde_json::to_string_pretty(items).map_err(|e| e.to_string())?;
        println!("{}", json);
        Ok(())
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-line rendering of one history row
pub fn format_item(item: &HistoryItem) -> String {
    let tag = match item.kind {
        EntryKind::Text => "text".normal(),
        EntryKind::File => "file".magenta(),
    };
    format!(
        "{}  {}  {}",
        format!("{:>3}", item.index).cyan(),
        tag,
        preview(&item.label)
    )
}

/// First line of `label`, shortened to `MAX_LABEL_CHARS`
fn preview(label: &str) -> String {
    let mut lines = label.lines();
    let first = lines.next().unwrap_or("");
    let multiline = lines.next().is_some();

    let mut shown: String = first.chars().take(MAX_LABEL_CHARS).collect();
    if multiline || first.chars().count() > MAX_LABEL_CHARS {
        shown.push('…');
    }
    shown
}
