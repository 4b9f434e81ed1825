//! Error types for the diff crate.

use lvc_types::ObjectId;

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A blob named by a manifest was not found in the store.
    #[error("blob {id} for {path} not found")]
    BlobNotFound { path: String, id: ObjectId },

    /// Blob content is neither UTF-8 nor UTF-16 text.
    #[error("content of {path} is not UTF-8 or UTF-16 text")]
    Decode { path: String },

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] lvc_store::StoreError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
