use thiserror::Error;

/// Errors that can occur while updating a changelog file
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to update changelog file: {0}")]
    Io(#[from] std::io::Error),
}
