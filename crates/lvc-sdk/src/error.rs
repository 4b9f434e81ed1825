use std::path::{Path, PathBuf};

use lvc_diff::DiffError;
use lvc_index::IndexError;
use lvc_ledger::LedgerError;
use lvc_refs::RefError;
use lvc_store::StoreError;
use lvc_types::ObjectId;
use serde::Serialize;
use thiserror::Error;

/// Coarse error categories callers branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced file, blob, commit or repository is missing.
    NotFound,
    /// The repository already exists.
    AlreadyExists,
    /// A required argument is missing or malformed.
    InvalidInput,
    /// The underlying filesystem failed.
    Io,
    /// Content is not UTF-8 or UTF-16 text.
    Decode,
    /// A commit's parent is present but cannot be resolved, or a commit
    /// cannot be parsed.
    CorruptChain,
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("not an lvc repository (no {} found)", .0.display())]
    NotInitialized(PathBuf),

    #[error("repository already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("file {} does not exist or is not a file", .0.display())]
    FileNotFound(PathBuf),

    #[error("commit {0} not found")]
    CommitNotFound(ObjectId),

    #[error("parent {parent} of commit {commit} cannot be read")]
    MissingParent { commit: ObjectId, parent: ObjectId },

    #[error("{0}")]
    InvalidInput(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("ref error: {0}")]
    Ref(#[from] RefError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("diff error: {0}")]
    Diff(#[from] DiffError),
}

impl SdkError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInitialized(_) | Self::FileNotFound(_) | Self::CommitNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::MissingParent { .. } => ErrorKind::CorruptChain,
            Self::InvalidInput(_) | Self::Config(_) => ErrorKind::InvalidInput,
            Self::Io { .. } => ErrorKind::Io,
            Self::Store(e) => store_kind(e),
            Self::Ref(e) => ref_kind(e),
            Self::Index(e) => index_kind(e),
            Self::Ledger(e) => ledger_kind(e),
            Self::Diff(e) => diff_kind(e),
        }
    }
}

fn store_kind(e: &StoreError) -> ErrorKind {
    match e {
        StoreError::NotFound(_) => ErrorKind::NotFound,
        StoreError::Io { .. } => ErrorKind::Io,
    }
}

fn ref_kind(e: &RefError) -> ErrorKind {
    match e {
        RefError::InvalidHead { .. } => ErrorKind::CorruptChain,
        RefError::Io { .. } => ErrorKind::Io,
    }
}

fn index_kind(e: &IndexError) -> ErrorKind {
    match e {
        IndexError::InvalidPath(_) => ErrorKind::InvalidInput,
        IndexError::Store(e) => store_kind(e),
        IndexError::Io { .. } => ErrorKind::Io,
    }
}

fn ledger_kind(e: &LedgerError) -> ErrorKind {
    match e {
        LedgerError::EmptyMessage | LedgerError::MultiLineMessage => ErrorKind::InvalidInput,
        LedgerError::MissingCommit { .. }
        | LedgerError::Cycle { .. }
        | LedgerError::CorruptCommit { .. } => ErrorKind::CorruptChain,
        LedgerError::Store(e) => store_kind(e),
        LedgerError::Ref(e) => ref_kind(e),
        LedgerError::Index(e) => index_kind(e),
    }
}

fn diff_kind(e: &DiffError) -> ErrorKind {
    match e {
        DiffError::BlobNotFound { .. } => ErrorKind::NotFound,
        DiffError::Decode { .. } => ErrorKind::Decode,
        DiffError::Store(e) => store_kind(e),
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
