//! Shared helpers for binary-level tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated HOME / XDG directories for one test
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["home", "config", "data", "runtime"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_file(&self) -> PathBuf {
        self.root().join("config").join("clipkeep").join("config.toml")
    }

    pub fn default_history_file(&self) -> PathBuf {
        self.root().join("data").join("clipkeep").join("history.json")
    }

    pub fn runtime_dir(&self) -> PathBuf {
        self.root().join("runtime")
    }

    /// Apply the sandbox environment to any command builder
    pub fn envs(&self) -> Vec<(&'static str, PathBuf)> {
        vec![
            ("HOME", self.root().join("home")),
            ("XDG_CONFIG_HOME", self.root().join("config")),
            ("XDG_DATA_HOME", self.root().join("data")),
            ("XDG_RUNTIME_DIR", self.runtime_dir()),
        ]
    }

    /// `clipkeep` with the sandbox environment and no display server
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("clipkeep").unwrap();
        cmd.envs(self.envs())
            .env_remove("WAYLAND_DISPLAY")
            .env_remove("DISPLAY")
            .env_remove("CLIPKEEP_HISTORY_FILE")
            .env_remove("CLIPKEEP_LOG");
        cmd
    }

    /// Write a history file holding the given text entries
    pub fn seed_texts(&self, path: &Path, texts: &[&str]) {
        let records: Vec<serde_json::Value> = texts
            .iter()
            .map(|t| serde_json::json!({ "type": "text", "value": t }))
            .collect();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, serde_json::to_string(&records).unwrap()).unwrap();
    }
}
