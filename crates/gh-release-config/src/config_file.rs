use crate::paths::{app_config_path, home_config_path, LOCAL_CONFIG_FILE};
use std::path::PathBuf;

/// Load config file content from the usual locations
///
/// Searches for the config file in:
/// 1. Current working directory as `.gh-release-notes.toml`
/// 2. Platform config directory as `gh-release-notes/config.toml`
/// 3. Home directory as `.gh-release-notes.toml`
///
/// Returns the path and content of the first file found, None otherwise.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    let candidates = std::iter::once(Some(PathBuf::from(LOCAL_CONFIG_FILE)))
        .chain([app_config_path(), home_config_path()])
        .flatten();

    for path in candidates {
        if let Ok(content) = std::fs::read_to_string(&path) {
            log::debug!("Loaded config from {}", path.display());
            return Some((path, content));
        }
    }

    None
}
