//! Error types for the storage layer.

/// Errors that can occur while reading or writing game files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A player name that cannot be turned into a save file name.
    #[error("invalid player name: {0:?}")]
    InvalidName(String),
}

/// Convenience result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
