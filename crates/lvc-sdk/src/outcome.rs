use lvc_diff::CommitDiff;
use lvc_types::ObjectId;
use serde::Serialize;

use crate::repository::Repository;

/// Result of `init`. Re-initialising is a notice, not an error.
#[derive(Debug)]
pub enum InitOutcome {
    Created(Repository),
    AlreadyInitialized(Repository),
}

impl InitOutcome {
    pub fn repository(&self) -> &Repository {
        match self {
            Self::Created(repo) | Self::AlreadyInitialized(repo) => repo,
        }
    }

    pub fn into_repository(self) -> Repository {
        match self {
            Self::Created(repo) | Self::AlreadyInitialized(repo) => repo,
        }
    }
}

/// Result of staging one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AddOutcome {
    Added { path: String, id: ObjectId },
    /// The index already held this exact content for the path.
    AlreadyStaged { path: String, id: ObjectId },
}

impl AddOutcome {
    pub fn path(&self) -> &str {
        match self {
            Self::Added { path, .. } | Self::AlreadyStaged { path, .. } => path,
        }
    }
}

/// Result of diffing a commit against its parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DiffOutcome {
    /// The commit has no parent; nothing was compared.
    FirstCommit { commit: ObjectId },
    /// Every file matches the parent.
    NoChanges { commit: ObjectId, parent: ObjectId },
    Changes(CommitDiff),
}
