//! Persistence backends for the staging index.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use lvc_types::Manifest;
use tracing::debug;

use crate::codec::{decode_index, encode_index};
use crate::error::{IndexError, IndexResult};

/// Persistence boundary for the staging index table.
pub trait IndexStore: Send + Sync {
    /// Read the persisted index. An index that was never written is empty.
    fn load(&self) -> IndexResult<Manifest>;

    /// Replace the persisted index with `manifest`.
    fn save(&self, manifest: &Manifest) -> IndexResult<()>;

    /// Overwrite the persisted index with the empty mapping.
    fn clear(&self) -> IndexResult<()> {
        self.save(&Manifest::new())
    }
}

/// Index stored as a UTF-8 text file.
#[derive(Clone, Debug)]
pub struct FsIndexStore {
    path: PathBuf,
}

impl FsIndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the index file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> IndexError {
        IndexError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl IndexStore for FsIndexStore {
    fn load(&self) -> IndexResult<Manifest> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(decode_index(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Manifest::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, manifest: &Manifest) -> IndexResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, encode_index(manifest)).map_err(|e| self.io_error(e))?;
        debug!(entries = manifest.len(), "index saved");
        Ok(())
    }
}

/// In-memory index for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryIndexStore {
    manifest: RwLock<Manifest>,
}

impl InMemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndexStore for InMemoryIndexStore {
    fn load(&self) -> IndexResult<Manifest> {
        Ok(self.manifest.read().expect("lock poisoned").clone())
    }

    fn save(&self, manifest: &Manifest) -> IndexResult<()> {
        *self.manifest.write().expect("lock poisoned") = manifest.clone();
        Ok(())
    }
}
