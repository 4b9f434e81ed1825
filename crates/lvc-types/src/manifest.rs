//! Insertion-ordered mapping from file path to blob id.
//!
//! Both the staging index and every commit record carry a manifest. Order is
//! not semantically significant, but the commit serialization is hashed, so
//! entries keep the order in which their path was first inserted.

use serde::{Deserialize, Serialize};

use crate::object::ObjectId;

/// A single `path -> blob` pairing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path of the tracked file, as given when it was staged.
    pub path: String,
    /// Id of the blob holding the file's content.
    pub id: ObjectId,
}

/// Flat snapshot of tracked files.
///
/// At most one entry exists per path; inserting an existing path replaces its
/// id in place (last write wins).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `path`. Returns the previous id, if any.
    pub fn insert(&mut self, path: impl Into<String>, id: ObjectId) -> Option<ObjectId> {
        let path = path.into();
        match self.entries.iter_mut().find(|e| e.path == path) {
            Some(entry) => Some(std::mem::replace(&mut entry.id, id)),
            None => {
                self.entries.push(ManifestEntry { path, id });
                None
            }
        }
    }

    /// Look up the blob id for `path`.
    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.iter().find(|e| e.path == path).map(|e| &e.id)
    }

    /// Returns `true` if `path` is tracked.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter()
    }

    /// Tracked paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the manifest has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: Into<String>> FromIterator<(P, ObjectId)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (P, ObjectId)>>(iter: I) -> Self {
        let mut manifest = Self::new();
        for (path, id) in iter {
            manifest.insert(path, id);
        }
        manifest
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
