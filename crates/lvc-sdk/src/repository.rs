use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use lvc_diff::CommitDiff;
use lvc_index::{FsIndexStore, IndexStore, StageOutcome, StagingArea};
use lvc_ledger::{CommitChain, CommitOutcome, CommitRecord, LogEntry, VerifyReport};
use lvc_refs::{FsHeadStore, HeadStore};
use lvc_store::{FsObjectStore, ObjectStore};
use lvc_types::{Manifest, ObjectId};
use tracing::{debug, info};

use crate::config::{RepoConfig, RepoLayout};
use crate::error::{SdkError, SdkResult};
use crate::outcome::{AddOutcome, DiffOutcome, InitOutcome};

/// A repository handle: object store, staging index and commit chain, plus
/// the working directory that `add` reads from.
pub struct Repository {
    work_dir: PathBuf,
    objects: Arc<dyn ObjectStore>,
    staging: StagingArea,
    chain: CommitChain,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("work_dir", &self.work_dir)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Create a repository in `work_dir`, or open the existing one.
    pub fn init(work_dir: impl Into<PathBuf>, config: &RepoConfig) -> SdkResult<InitOutcome> {
        let layout = config.layout(work_dir);
        match Self::create(&layout) {
            Ok(repo) => Ok(InitOutcome::Created(repo)),
            Err(SdkError::AlreadyExists(dir)) => {
                debug!(repo = %dir.display(), "repository already exists");
                Ok(InitOutcome::AlreadyInitialized(Self::from_layout(&layout)))
            }
            Err(e) => Err(e),
        }
    }

    /// Create the on-disk layout. Fails with `AlreadyExists` if the
    /// repository directory is already there.
    pub fn create(layout: &RepoLayout) -> SdkResult<Self> {
        if layout.repo_dir.exists() {
            return Err(SdkError::AlreadyExists(layout.repo_dir.clone()));
        }

        for dir in [&layout.objects_dir, &layout.refs_dir] {
            fs::create_dir_all(dir).map_err(|e| SdkError::io(dir, e))?;
        }
        for file in [&layout.index_file, &layout.head_file] {
            fs::write(file, b"").map_err(|e| SdkError::io(file, e))?;
        }

        info!(repo = %layout.repo_dir.display(), "initialized empty repository");
        Ok(Self::from_layout(layout))
    }

    /// Open the repository in `work_dir`.
    pub fn open(work_dir: impl Into<PathBuf>, config: &RepoConfig) -> SdkResult<Self> {
        let layout = config.layout(work_dir);
        if !layout.repo_dir.is_dir() {
            return Err(SdkError::NotInitialized(layout.repo_dir));
        }
        Ok(Self::from_layout(&layout))
    }

    fn from_layout(layout: &RepoLayout) -> Self {
        Self::with_backends(
            layout.work_dir.clone(),
            Arc::new(FsObjectStore::new(&layout.objects_dir)),
            Arc::new(FsIndexStore::new(&layout.index_file)),
            Arc::new(FsHeadStore::new(&layout.head_file)),
        )
    }

    /// Assemble a repository from explicit backends.
    pub fn with_backends(
        work_dir: impl Into<PathBuf>,
        objects: Arc<dyn ObjectStore>,
        index: Arc<dyn IndexStore>,
        head: Arc<dyn HeadStore>,
    ) -> Self {
        Self {
            work_dir: work_dir.into(),
            staging: StagingArea::new(objects.clone(), index),
            chain: CommitChain::new(objects.clone(), head),
            objects,
        }
    }

    // ---- Staging ----

    /// Stage one file.
    ///
    /// Relative paths resolve against the working directory. The index key is
    /// the path relative to the working directory when the file lies inside
    /// it, otherwise the path as given.
    pub fn add(&self, path: impl AsRef<Path>) -> SdkResult<AddOutcome> {
        let path = path.as_ref();
        let full = self.work_dir.join(path);
        if !full.is_file() {
            return Err(SdkError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read(&full).map_err(|e| SdkError::io(&full, e))?;

        let key = index_key(&self.work_dir, path);
        let outcome = match self.staging.stage(&key, &content)? {
            StageOutcome::Staged(id) => AddOutcome::Added { path: key, id },
            StageOutcome::AlreadyStaged(id) => AddOutcome::AlreadyStaged { path: key, id },
        };
        Ok(outcome)
    }

    /// Stage several files in order. Stops at the first failure.
    pub fn add_all<P: AsRef<Path>>(
        &self,
        paths: impl IntoIterator<Item = P>,
    ) -> SdkResult<Vec<AddOutcome>> {
        paths.into_iter().map(|p| self.add(p)).collect()
    }

    /// Current staged mapping.
    pub fn status(&self) -> SdkResult<Manifest> {
        Ok(self.staging.read()?)
    }

    // ---- Commits ----

    /// Commit the staged files. The index is empty afterwards whether or not
    /// this succeeds.
    pub fn commit(&self, message: &str) -> SdkResult<CommitOutcome> {
        Ok(self.chain.commit(&self.staging, message)?)
    }

    pub fn head(&self) -> SdkResult<Option<ObjectId>> {
        Ok(self.chain.head()?)
    }

    /// Read a commit; `None` if no object has that id.
    pub fn read_commit(&self, id: &ObjectId) -> SdkResult<Option<CommitRecord>> {
        Ok(self.chain.read_commit(id)?)
    }

    /// History from HEAD, newest first. Empty before the first commit.
    pub fn log(&self) -> SdkResult<Vec<LogEntry>> {
        Ok(self.chain.log()?)
    }

    pub fn verify(&self) -> SdkResult<VerifyReport> {
        Ok(self.chain.verify()?)
    }

    // ---- Diff ----

    /// Diff the commit named by the hex string `commit` against its parent.
    pub fn diff(&self, commit: &str) -> SdkResult<DiffOutcome> {
        let commit = commit.trim();
        if commit.is_empty() {
            return Err(SdkError::InvalidInput("commit hash is required".into()));
        }
        let id = ObjectId::from_hex(commit)
            .map_err(|e| SdkError::InvalidInput(format!("invalid commit hash {commit:?}: {e}")))?;
        self.diff_commit(&id)
    }

    /// Diff HEAD against its parent.
    pub fn diff_head(&self) -> SdkResult<DiffOutcome> {
        let head = self.head()?.ok_or_else(|| {
            SdkError::InvalidInput("no commits yet; a commit hash is required".into())
        })?;
        self.diff_commit(&head)
    }

    pub fn diff_commit(&self, id: &ObjectId) -> SdkResult<DiffOutcome> {
        let record = self
            .read_commit(id)?
            .ok_or(SdkError::CommitNotFound(*id))?;

        let Some(parent_id) = record.parent else {
            return Ok(DiffOutcome::FirstCommit { commit: *id });
        };
        let parent = self
            .read_commit(&parent_id)?
            .ok_or(SdkError::MissingParent {
                commit: *id,
                parent: parent_id,
            })?;

        let diff = CommitDiff::compute(
            self.objects.as_ref(),
            *id,
            &record.files,
            parent_id,
            &parent.files,
        )?;
        if diff.is_empty() {
            return Ok(DiffOutcome::NoChanges {
                commit: *id,
                parent: parent_id,
            });
        }
        Ok(DiffOutcome::Changes(diff))
    }

    // ---- Accessors ----

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn objects(&self) -> &dyn ObjectStore {
        self.objects.as_ref()
    }
}

fn index_key(work_dir: &Path, path: &Path) -> String {
    let relative = match path.strip_prefix(work_dir) {
        Ok(relative) => relative,
        Err(_) if path.is_absolute() => return path.to_string_lossy().into_owned(),
        Err(_) => path,
    };
    relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
