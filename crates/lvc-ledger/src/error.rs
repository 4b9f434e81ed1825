use lvc_types::ObjectId;

/// Errors produced by commit chain operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A commit message was empty.
    #[error("commit message must not be empty")]
    EmptyMessage,

    /// The record layout has room for a single message line.
    #[error("commit message must be a single line")]
    MultiLineMessage,

    /// A commit named by HEAD or by a parent pointer is not in the store.
    #[error("{}", missing_commit_message(.id, .referenced_by.as_ref()))]
    MissingCommit {
        id: ObjectId,
        referenced_by: Option<ObjectId>,
    },

    /// A parent pointer leads back to a commit already walked.
    #[error("commit {id} appears twice in the chain (reached from {})", display_child(.referenced_by.as_ref()))]
    Cycle {
        id: ObjectId,
        referenced_by: Option<ObjectId>,
    },

    /// A stored commit could not be parsed.
    #[error("corrupt commit {id}: {reason}")]
    CorruptCommit { id: ObjectId, reason: String },

    #[error("store error: {0}")]
    Store(#[from] lvc_store::StoreError),

    #[error("ref error: {0}")]
    Ref(#[from] lvc_refs::RefError),

    #[error("index error: {0}")]
    Index(#[from] lvc_index::IndexError),
}

fn missing_commit_message(id: &ObjectId, referenced_by: Option<&ObjectId>) -> String {
    match referenced_by {
        Some(child) => format!("commit {id} (parent of {child}) is missing"),
        None => format!("commit {id} named by HEAD is missing"),
    }
}

fn display_child(child: Option<&ObjectId>) -> String {
    child.map_or_else(|| "HEAD".to_string(), ToString::to_string)
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
