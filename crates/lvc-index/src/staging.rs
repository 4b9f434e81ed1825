//! Staging file content into the object store and index.
//!
//! Filesystem access to the working file itself is the caller's job; the
//! staging area receives the path and the bytes.

use std::sync::Arc;

use lvc_crypto::ContentHasher;
use lvc_store::ObjectStore;
use lvc_types::{Manifest, ObjectId};
use tracing::debug;

use crate::error::{IndexError, IndexResult};
use crate::store::IndexStore;

/// Result of staging one file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageOutcome {
    /// The index now maps the path to this id.
    Staged(ObjectId),
    /// The index already mapped the path to this exact id; nothing was written.
    AlreadyStaged(ObjectId),
}

impl StageOutcome {
    /// The content id, whichever way the call went.
    pub fn id(&self) -> ObjectId {
        match self {
            Self::Staged(id) | Self::AlreadyStaged(id) => *id,
        }
    }
}

/// The staging area: an index table plus the object store it refers into.
#[derive(Clone)]
pub struct StagingArea {
    objects: Arc<dyn ObjectStore>,
    index: Arc<dyn IndexStore>,
}

impl std::fmt::Debug for StagingArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagingArea").finish_non_exhaustive()
    }
}

impl StagingArea {
    pub fn new(objects: Arc<dyn ObjectStore>, index: Arc<dyn IndexStore>) -> Self {
        Self { objects, index }
    }

    /// Current staged mapping. Empty when nothing has been staged.
    pub fn read(&self) -> IndexResult<Manifest> {
        self.index.load()
    }

    /// Stage `content` under `path`.
    ///
    /// If the index already maps `path` to the content's id this is a no-op.
    /// Otherwise the blob is stored (deduplicated by id) and the index is
    /// rewritten with `path` inserted or overwritten; other entries are kept.
    pub fn stage(&self, path: &str, content: &[u8]) -> IndexResult<StageOutcome> {
        if path.is_empty() {
            return Err(IndexError::InvalidPath(path.to_string()));
        }

        let id = ContentHasher::hash(content);
        let mut manifest = self.index.load()?;
        if manifest.get(path) == Some(&id) {
            debug!(path, id = %id.short_hex(), "already staged");
            return Ok(StageOutcome::AlreadyStaged(id));
        }

        self.objects.store(&id, content)?;
        manifest.insert(path, id);
        self.index.save(&manifest)?;

        debug!(path, id = %id.short_hex(), entries = manifest.len(), "staged");
        Ok(StageOutcome::Staged(id))
    }

    /// Empty the index.
    pub fn clear(&self) -> IndexResult<()> {
        self.index.clear()
    }
}
