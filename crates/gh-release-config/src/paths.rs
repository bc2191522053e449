//! Configuration file locations
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/gh-release-notes/config.toml`
//! - macOS: `~/Library/Application Support/gh-release-notes/config.toml`
//! - Windows: `%APPDATA%\gh-release-notes\config.toml`

use std::path::PathBuf;

const APP_NAME: &str = "gh-release-notes";

/// Name of the config file looked up in the working and home directories
pub const LOCAL_CONFIG_FILE: &str = ".gh-release-notes.toml";

/// Get the application config directory, if the platform defines one
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME))
}

/// Get path to the global config file
pub fn app_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get path to the config file in the home directory
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOCAL_CONFIG_FILE))
}
