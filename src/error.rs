use thiserror::Error;

/// Errors that can occur when persisting uploads and grid pieces to disk
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Failed to create an artifact directory at startup
    #[error("Failed to create directory {path}: {message}")]
    CreateDir { path: String, message: String },

    /// Failed to write an artifact file
    #[error("Failed to write artifact {path}: {message}")]
    Write { path: String, message: String },
}

/// Errors from the grid partition pipeline
#[derive(Debug, Clone, Error)]
pub enum SplitError {
    /// Upload rejected before partitioning (should map to HTTP 400)
    #[error("Invalid upload: {reason}")]
    Validation { reason: String },

    /// Uploaded bytes could not be decoded as an image
    #[error("Failed to decode image: {message}")]
    Decode { message: String },

    /// A computed piece could not be serialized as JPEG
    #[error("Failed to encode piece: {message}")]
    Encode { message: String },

    /// Persisting an artifact failed
    #[error("Storage error: {0}")]
    Io(#[from] StorageError),
}
