//! Error types for reference operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during reference operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// HEAD holds something other than an empty value or a hex digest.
    #[error("HEAD is corrupt: {content:?}")]
    InvalidHead { content: String },

    /// I/O error during file-based ref operations.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for ref operations.
pub type Result<T> = std::result::Result<T, RefError>;
