use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Names of the on-disk repository pieces, relative to the working root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Repository directory inside the working root.
    pub repo_dir: PathBuf,
    /// Object directory inside `repo_dir`.
    pub objects_dir: PathBuf,
    /// Index file inside `repo_dir`.
    pub index_file: PathBuf,
    /// HEAD file inside `repo_dir`.
    pub head_file: PathBuf,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            repo_dir: PathBuf::from(".lvc"),
            objects_dir: PathBuf::from("Objects"),
            index_file: PathBuf::from("Index"),
            head_file: PathBuf::from("HEAD"),
        }
    }
}

impl RepoConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> SdkResult<Self> {
        toml::from_str(text).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SdkError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Resolve every location against `work_dir`.
    pub fn layout(&self, work_dir: impl Into<PathBuf>) -> RepoLayout {
        let work_dir = work_dir.into();
        let repo_dir = work_dir.join(&self.repo_dir);
        RepoLayout {
            objects_dir: repo_dir.join(&self.objects_dir),
            refs_dir: repo_dir.join("refs").join("heads"),
            index_file: repo_dir.join(&self.index_file),
            head_file: repo_dir.join(&self.head_file),
            repo_dir,
            work_dir,
        }
    }
}

/// Absolute locations of one repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoLayout {
    pub work_dir: PathBuf,
    pub repo_dir: PathBuf,
    pub objects_dir: PathBuf,
    /// Created by `init` for layout compatibility; nothing reads it.
    pub refs_dir: PathBuf,
    pub index_file: PathBuf,
    pub head_file: PathBuf,
}
