//! Application directory paths.
//!
//! Uses the [`dirs`] crate for platform-appropriate locations.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Data | `~/Library/Application Support/ebooktw/` | `~/.local/share/ebooktw/` |
//! | Config | `~/Library/Application Support/ebooktw/` | `~/.config/ebooktw/` |
//!
//! # Environment Overrides
//!
//! - `EBOOKTW_DATA_DIR` overrides [`data_dir`]
//! - `EBOOKTW_CONFIG_DIR` overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root: search history and logs.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("EBOOKTW_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("ebooktw"))
        .unwrap_or_else(|| std::env::temp_dir().join("ebooktw-data"))
}

/// Application config directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("EBOOKTW_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("ebooktw"))
        .unwrap_or_else(|| std::env::temp_dir().join("ebooktw-config"))
}

/// Main config file (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Search history file (`data_dir()/history.json`).
#[must_use]
pub fn history_file() -> PathBuf {
    data_dir().join("history.json")
}

/// Log file directory (`data_dir()/logs/`).
#[must_use]
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}
