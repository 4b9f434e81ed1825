//! Manifest-level diff: which paths were added, deleted, or re-pointed.

use lvc_types::{Manifest, ObjectId};
use serde::Serialize;

/// A single path-level change between a parent manifest and its child.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileChange {
    /// Path present only in the child.
    Added { path: String, id: ObjectId },
    /// Path present only in the parent.
    Deleted { path: String, id: ObjectId },
    /// Path present in both with different blob ids.
    Modified {
        path: String,
        old_id: ObjectId,
        new_id: ObjectId,
    },
}

impl FileChange {
    pub fn path(&self) -> &str {
        match self {
            Self::Added { path, .. } | Self::Deleted { path, .. } | Self::Modified { path, .. } => {
                path
            }
        }
    }
}

/// Compare two manifests.
///
/// Paths mapped to the same id in both are unchanged and omitted. Added and
/// modified paths come first in `new` order, then deleted paths in `old`
/// order.
pub fn diff_manifests(old: &Manifest, new: &Manifest) -> Vec<FileChange> {
    let mut changes = Vec::new();

    for entry in new {
        match old.get(&entry.path) {
            Some(old_id) if *old_id == entry.id => {}
            Some(old_id) => changes.push(FileChange::Modified {
                path: entry.path.clone(),
                old_id: *old_id,
                new_id: entry.id,
            }),
            None => changes.push(FileChange::Added {
                path: entry.path.clone(),
                id: entry.id,
            }),
        }
    }

    for entry in old {
        if !new.contains(&entry.path) {
            changes.push(FileChange::Deleted {
                path: entry.path.clone(),
                id: entry.id,
            });
        }
    }

    changes
}
