use std::path::Path;

use crate::error::ChangelogError;

/// Insert a release changelog below the first line of an existing changelog
///
/// Returns `None` when `existing` already contains `addition`, so merging the
/// same release twice is a no-op.
pub fn merge_into_changelog(existing: &str, addition: &str) -> Option<String> {
    if existing.contains(addition) {
        return None;
    }
    if existing.is_empty() {
        return Some(addition.to_string());
    }

    let (first, rest) = match existing.find('\n') {
        Some(index) => existing.split_at(index + 1),
        None => (existing, ""),
    };

    let mut merged = String::with_capacity(existing.len() + addition.len() + 2);
    merged.push_str(first);
    if !first.ends_with('\n') {
        merged.push('\n');
    }
    merged.push('\n');
    merged.push_str(addition);
    merged.push('\n');
    merged.push_str(rest);
    Some(merged)
}

/// Merge `addition` into the changelog file at `path`
///
/// A missing file is created. Returns whether the file changed.
pub fn add_to_changelog_file(path: &Path, addition: &str) -> Result<bool, ChangelogError> {
    let existing = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("Creating changelog file {}", path.display());
            String::new()
        }
        Err(e) => return Err(e.into()),
    };

    let Some(merged) = merge_into_changelog(&existing, addition) else {
        log::info!("{} already contains this changelog", path.display());
        return Ok(false);
    };

    std::fs::write(path, merged)?;
    log::debug!("Updated changelog file {}", path.display());
    Ok(true)
}
