//! Store error types.

use std::path::PathBuf;

/// Errors reading or writing the store. All of them abort an update cycle.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store file could not be read
    #[error("failed to read store {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Store file is not a valid document
    #[error("failed to parse store {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Document could not be serialized
    #[error("failed to serialize store: {message}")]
    Serialize { message: String },

    /// Store file could not be written
    #[error("failed to write store {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Blocking store task did not finish
    #[error("store task failed: {message}")]
    Task { message: String },
}
