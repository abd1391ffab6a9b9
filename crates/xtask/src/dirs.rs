//! Platform-specific directory utilities
//!
//! Save and log locations follow platform conventions unless overridden by
//! `SAVE_DATA_DIR`:
//! - macOS: `~/Library/Application Support/wordbattle`, `~/Library/Caches/wordbattle/logs`
//! - Linux: `~/.local/share/wordbattle`, `~/.cache/wordbattle/logs`
//! - Windows: `%APPDATA%\wordbattle`, `%LOCALAPPDATA%\wordbattle\logs`

use std::path::PathBuf;

use runtime::RuntimeConfig;

/// Directory holding `{session}.json` save documents.
pub fn save_dir() -> PathBuf {
    RuntimeConfig::from_env().save_dir
}

/// Directory holding one log folder per session.
pub fn log_dir() -> PathBuf {
    runtime::config::default_log_dir()
}
