//! Directory-backed object store.
//!
//! Layout: one regular file per object, named by the object's hex digest,
//! holding the raw bytes.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use lvc_types::ObjectId;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

/// Object store rooted at a directory on disk.
#[derive(Clone, Debug)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Open a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding the objects.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file that holds (or would hold) `id`.
    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.root.join(id.to_hex())
    }
}

impl ObjectStore for FsObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        let path = self.object_path(id);
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn store(&self, id: &ObjectId, data: &[u8]) -> StoreResult<bool> {
        let path = self.object_path(id);
        if path.exists() {
            debug!(id = %id.short_hex(), "object already present");
            return Ok(false);
        }

        fs::create_dir_all(&self.root).map_err(|e| StoreError::io(&self.root, e))?;

        // Temp file then rename: an id never names a truncated object.
        let mut tmp =
            tempfile::NamedTempFile::new_in(&self.root).map_err(|e| StoreError::io(&self.root, e))?;
        tmp.write_all(data).map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| StoreError::io(&path, e.error))?;

        debug!(id = %id.short_hex(), bytes = data.len(), "object written");
        Ok(true)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.object_path(id).is_file())
    }
}
