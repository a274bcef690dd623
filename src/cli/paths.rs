//! Per-session runtime file locations

use std::env;
use std::path::PathBuf;

/// Resolve `file_name` inside `$XDG_RUNTIME_DIR`, falling back to the temp dir
pub fn runtime_path(file_name: &str) -> PathBuf {
    env::var_os("XDG_RUNTIME_DIR")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(env::temp_dir)
        .join(file_name)
}
