//! File-backed HEAD store.
//!
//! The HEAD file holds exactly the hex digest of the latest commit, or is
//! empty when no commit exists.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lvc_types::ObjectId;
use tracing::debug;

use crate::error::{RefError, Result};
use crate::traits::HeadStore;

/// HEAD stored as a single text file.
#[derive(Clone, Debug)]
pub struct FsHeadStore {
    path: PathBuf,
}

impl FsHeadStore {
    /// Use the HEAD file at `path`. A missing file reads as "no commits".
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the HEAD file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> RefError {
        RefError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HeadStore for FsHeadStore {
    fn head(&self) -> Result<Option<ObjectId>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        ObjectId::from_hex(trimmed)
            .map(Some)
            .map_err(|_| RefError::InvalidHead {
                content: trimmed.to_string(),
            })
    }

    fn set_head(&self, id: &ObjectId) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, id.to_hex()).map_err(|e| self.io_error(e))?;
        debug!(head = %id.short_hex(), "HEAD updated");
        Ok(())
    }
}
