//! Commit-level diff: a child manifest against its parent's, with the line
//! diff of every affected file.

use std::fmt;

use lvc_store::ObjectStore;
use lvc_types::{Manifest, ObjectId};
use serde::Serialize;
use tracing::debug;

use crate::blob_diff::{all_added, all_removed, diff_text, BlobDiff, DiffLine};
use crate::error::{DiffError, DiffResult};
use crate::manifest_diff::{diff_manifests, FileChange};
use crate::text::decode_text;

/// Line-level changes to one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileDiff {
    Added {
        path: String,
        lines: Vec<DiffLine>,
    },
    Deleted {
        path: String,
        lines: Vec<DiffLine>,
    },
    Modified {
        path: String,
        diff: BlobDiff,
    },
}

impl FileDiff {
    pub fn path(&self) -> &str {
        match self {
            Self::Added { path, .. } | Self::Deleted { path, .. } | Self::Modified { path, .. } => {
                path
            }
        }
    }
}

/// Every file that changed in a commit relative to its parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommitDiff {
    pub commit: ObjectId,
    pub parent: ObjectId,
    pub files: Vec<FileDiff>,
}

impl CommitDiff {
    /// Diff `commit`'s manifest against `parent`'s, loading blob content from
    /// `store`.
    ///
    /// A path whose id changed but whose decoded lines are identical is left
    /// out.
    pub fn compute(
        store: &dyn ObjectStore,
        commit: ObjectId,
        manifest: &Manifest,
        parent: ObjectId,
        parent_manifest: &Manifest,
    ) -> DiffResult<Self> {
        let mut files = Vec::new();

        for change in diff_manifests(parent_manifest, manifest) {
            match change {
                FileChange::Added { path, id } => {
                    let text = load_text(store, &path, &id)?;
                    files.push(FileDiff::Added {
                        lines: all_added(&text),
                        path,
                    });
                }
                FileChange::Deleted { path, id } => {
                    let text = load_text(store, &path, &id)?;
                    files.push(FileDiff::Deleted {
                        lines: all_removed(&text),
                        path,
                    });
                }
                FileChange::Modified {
                    path,
                    old_id,
                    new_id,
                } => {
                    let old = load_text(store, &path, &old_id)?;
                    let new = load_text(store, &path, &new_id)?;
                    let diff = diff_text(&old, &new);
                    if diff.is_empty() {
                        debug!(path = %path, "ids differ but lines are identical");
                        continue;
                    }
                    files.push(FileDiff::Modified { path, diff });
                }
            }
        }

        debug!(commit = %commit.short_hex(), files = files.len(), "commit diffed");
        Ok(Self {
            commit,
            parent,
            files,
        })
    }

    /// Returns `true` if no file produced output.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Human-readable report.
///
/// ```text
/// These are the files changed in <hash>:
///
/// diff --lvc a.txt
/// --- a/a.txt
/// +++ b/a.txt
/// @@ -1 +1 @@
/// -hello
/// +hello world
/// ```
impl fmt::Display for CommitDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "These are the files changed in {}:", self.commit)?;
        for file in &self.files {
            write!(f, "\n\ndiff --lvc {}", file.path())?;
            match file {
                FileDiff::Added { path, lines } => {
                    write!(f, "\nNew file added\n+++ b/{path}")?;
                    for line in lines {
                        write!(f, "\n{line}")?;
                    }
                }
                FileDiff::Deleted { path, lines } => {
                    write!(f, "\nFile has been deleted\n--- a/{path}")?;
                    for line in lines {
                        write!(f, "\n{line}")?;
                    }
                }
                FileDiff::Modified { path, diff } => {
                    write!(f, "\n{}", diff.render_unified(path))?;
                }
            }
        }
        Ok(())
    }
}

fn load_text(store: &dyn ObjectStore, path: &str, id: &ObjectId) -> DiffResult<String> {
    let bytes = store.read(id)?.ok_or_else(|| DiffError::BlobNotFound {
        path: path.to_string(),
        id: *id,
    })?;
    decode_text(&bytes).ok_or_else(|| DiffError::Decode {
        path: path.to_string(),
    })
}
