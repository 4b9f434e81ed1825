//! Commit creation and history traversal.

use std::collections::HashSet;
use std::sync::Arc;

use lvc_index::StagingArea;
use lvc_refs::HeadStore;
use lvc_store::ObjectStore;
use lvc_types::{CommitTimestamp, ObjectId};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::record::{CommitRecord, StoredCommit};

/// Result of a commit attempt that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new commit was stored and HEAD now points at it.
    Committed { id: ObjectId, record: CommitRecord },
    /// The staging index was empty; nothing was written and HEAD is unchanged.
    NothingToCommit,
}

/// One line of history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: ObjectId,
    pub parent: Option<ObjectId>,
    pub timestamp: CommitTimestamp,
    pub message: String,
}

/// The linear commit chain: commit objects in the store, rooted at HEAD.
#[derive(Clone)]
pub struct CommitChain {
    objects: Arc<dyn ObjectStore>,
    head: Arc<dyn HeadStore>,
}

impl std::fmt::Debug for CommitChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitChain").finish_non_exhaustive()
    }
}

impl CommitChain {
    pub fn new(objects: Arc<dyn ObjectStore>, head: Arc<dyn HeadStore>) -> Self {
        Self { objects, head }
    }

    /// Current HEAD, or `None` before the first commit.
    pub fn head(&self) -> LedgerResult<Option<ObjectId>> {
        Ok(self.head.head()?)
    }

    pub(crate) fn objects(&self) -> &dyn ObjectStore {
        self.objects.as_ref()
    }

    /// Commit the staged files with the current local time.
    pub fn commit(&self, staging: &StagingArea, message: &str) -> LedgerResult<CommitOutcome> {
        self.commit_at(staging, message, CommitTimestamp::now())
    }

    /// Commit the staged files with an explicit timestamp.
    ///
    /// The staging index is cleared afterwards whether or not the attempt
    /// succeeded. There is no rollback: if the commit object was stored but
    /// HEAD could not be written, the object stays and HEAD keeps its last
    /// successfully written value.
    pub fn commit_at(
        &self,
        staging: &StagingArea,
        message: &str,
        timestamp: CommitTimestamp,
    ) -> LedgerResult<CommitOutcome> {
        let result = self.try_commit(staging, message, timestamp);

        match staging.clear() {
            Ok(()) => result,
            Err(e) => match result {
                Ok(_) => Err(e.into()),
                Err(original) => {
                    warn!(error = %e, "failed to clear index after failed commit");
                    Err(original)
                }
            },
        }
    }

    fn try_commit(
        &self,
        staging: &StagingArea,
        message: &str,
        timestamp: CommitTimestamp,
    ) -> LedgerResult<CommitOutcome> {
        let files = staging.read()?;
        if files.is_empty() {
            debug!("nothing staged");
            return Ok(CommitOutcome::NothingToCommit);
        }

        // The record layout holds the message on one trimmed line.
        let message = message.trim();
        if message.is_empty() {
            return Err(LedgerError::EmptyMessage);
        }
        if message.contains(['\n', '\r']) {
            return Err(LedgerError::MultiLineMessage);
        }

        let record = CommitRecord {
            parent: self.head.head()?,
            timestamp,
            message: message.to_string(),
            files,
        };
        let id = self.objects.write(&record.encode())?;
        self.head.set_head(&id)?;

        debug!(
            id = %id.short_hex(),
            parent = ?record.parent.map(|p| p.short_hex()),
            files = record.files.len(),
            "commit created"
        );
        Ok(CommitOutcome::Committed { id, record })
    }

    /// Load and parse a commit.
    ///
    /// Returns `Ok(None)` when no object with that id exists; the caller
    /// decides whether absence is expected.
    pub fn read_commit(&self, id: &ObjectId) -> LedgerResult<Option<CommitRecord>> {
        Ok(self.read_stored(id)?.map(|stored| stored.record))
    }

    pub(crate) fn read_stored(&self, id: &ObjectId) -> LedgerResult<Option<StoredCommit>> {
        let Some(raw) = self.objects.read(id)? else {
            return Ok(None);
        };
        let record = CommitRecord::decode(&raw).map_err(|reason| LedgerError::CorruptCommit {
            id: *id,
            reason,
        })?;
        Ok(Some(StoredCommit {
            id: *id,
            raw,
            record,
        }))
    }

    /// Walk the chain from HEAD towards the root.
    pub fn history(&self) -> LedgerResult<History<'_>> {
        Ok(History {
            chain: self,
            next: self.head.head()?,
            child: None,
            visited: HashSet::new(),
        })
    }

    /// Every commit from HEAD to the root, newest first.
    ///
    /// Empty when there are no commits. A missing commit anywhere in the
    /// chain is an error.
    pub fn log(&self) -> LedgerResult<Vec<LogEntry>> {
        self.history()?
            .map(|stored| {
                stored.map(|s| LogEntry {
                    id: s.id,
                    parent: s.record.parent,
                    timestamp: s.record.timestamp,
                    message: s.record.message,
                })
            })
            .collect()
    }
}

/// Iterator over stored commits from HEAD back to the root.
///
/// Yields an error (and then stops) if a referenced commit is missing,
/// unreadable, or was already visited.
pub struct History<'a> {
    chain: &'a CommitChain,
    next: Option<ObjectId>,
    child: Option<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl Iterator for History<'_> {
    type Item = LedgerResult<StoredCommit>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        if !self.visited.insert(id) {
            return Some(Err(LedgerError::Cycle {
                id,
                referenced_by: self.child,
            }));
        }
        match self.chain.read_stored(&id) {
            Ok(Some(stored)) => {
                self.next = stored.record.parent;
                self.child = Some(id);
                Some(Ok(stored))
            }
            Ok(None) => Some(Err(LedgerError::MissingCommit {
                id,
                referenced_by: self.child,
            })),
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvc_index::InMemoryIndexStore;
    use lvc_refs::InMemoryHeadStore;
    use lvc_store::InMemoryObjectStore;

    struct Fixture {
        objects: Arc<InMemoryObjectStore>,
        head: Arc<InMemoryHeadStore>,
        staging: StagingArea,
        chain: CommitChain,
    }

    fn fixture() -> Fixture {
        let objects = Arc::new(InMemoryObjectStore::new());
        let head = Arc::new(InMemoryHeadStore::new());
        let index = Arc::new(InMemoryIndexStore::new());
        Fixture {
            staging: StagingArea::new(objects.clone(), index),
            chain: CommitChain::new(objects.clone(), head.clone()),
            objects,
            head,
        }
    }

    fn ts(n: u32) -> CommitTimestamp {
        CommitTimestamp::from_raw(format!("Mon Jan 02 15:04:{n:02} 2006"))
    }

    fn commit(fx: &Fixture, files: &[(&str, &str)], message: &str, n: u32) -> ObjectId {
        for (path, content) in files {
            fx.staging.stage(path, content.as_bytes()).unwrap();
        }
        match fx.chain.commit_at(&fx.staging, message, ts(n)).unwrap() {
            CommitOutcome::Committed { id, .. } => id,
            CommitOutcome::NothingToCommit => panic!("expected a commit"),
        }
    }

    #[test]
    fn first_commit_has_no_parent_and_moves_head() {
        let fx = fixture();
        let id = commit(&fx, &[("a.txt", "hello")], "first", 0);

        assert_eq!(fx.head.head().unwrap(), Some(id));
        let record = fx.chain.read_commit(&id).unwrap().unwrap();
        assert_eq!(record.parent, None);
        assert_eq!(record.message, "first");
        assert_eq!(id, record.id());
    }

    #[test]
    fn commit_id_is_digest_of_stored_bytes() {
        let fx = fixture();
        let id = commit(&fx, &[("a.txt", "hello")], "first", 0);
        let raw = fx.objects.load(&id).unwrap();
        assert_eq!(lvc_crypto::ContentHasher::hash(&raw), id);
    }

    #[test]
    fn second_commit_links_to_first() {
        let fx = fixture();
        let first = commit(&fx, &[("a.txt", "hello")], "first", 0);
        let second = commit(&fx, &[("a.txt", "hello world")], "second", 1);

        let record = fx.chain.read_commit(&second).unwrap().unwrap();
        assert_eq!(record.parent, Some(first));
    }

    #[test]
    fn index_is_cleared_after_success() {
        let fx = fixture();
        commit(&fx, &[("a.txt", "hello")], "first", 0);
        assert!(fx.staging.read().unwrap().is_empty());
    }

    #[test]
    fn manifest_holds_only_what_was_staged_since_last_commit() {
        let fx = fixture();
        commit(&fx, &[("a.txt", "a")], "first", 0);
        let second = commit(&fx, &[("b.txt", "b")], "second", 1);

        let record = fx.chain.read_commit(&second).unwrap().unwrap();
        assert_eq!(record.files.paths().collect::<Vec<_>>(), vec!["b.txt"]);
    }

    #[test]
    fn empty_index_is_nothing_to_commit() {
        let fx = fixture();
        let outcome = fx.chain.commit_at(&fx.staging, "msg", ts(0)).unwrap();
        assert_eq!(outcome, CommitOutcome::NothingToCommit);
        assert_eq!(fx.head.head().unwrap(), None);
        assert!(fx.objects.is_empty());
    }

    #[test]
    fn blank_message_is_rejected_and_index_cleared() {
        let fx = fixture();
        fx.staging.stage("a.txt", b"hello").unwrap();

        let err = fx.chain.commit_at(&fx.staging, "   ", ts(0)).unwrap_err();

        assert!(matches!(err, LedgerError::EmptyMessage));
        assert!(fx.staging.read().unwrap().is_empty());
        assert_eq!(fx.head.head().unwrap(), None);
    }

    #[test]
    fn blank_message_with_nothing_staged_is_nothing_to_commit() {
        let fx = fixture();
        let outcome = fx.chain.commit_at(&fx.staging, "", ts(0)).unwrap();
        assert_eq!(outcome, CommitOutcome::NothingToCommit);
    }

    #[test]
    fn multi_line_message_is_rejected() {
        let fx = fixture();
        fx.staging.stage("a.txt", b"hello").unwrap();

        let err = fx
            .chain
            .commit_at(&fx.staging, "subject\n\nbody", ts(0))
            .unwrap_err();

        assert!(matches!(err, LedgerError::MultiLineMessage));
        assert!(fx.staging.read().unwrap().is_empty());
        assert_eq!(fx.objects.len(), 1);
        assert_eq!(fx.head.head().unwrap(), None);
    }

    #[test]
    fn message_is_stored_trimmed_and_reads_back_identically() {
        let fx = fixture();
        let id = commit(&fx, &[("a.txt", "hello")], "  padded message \t", 0);

        let record = fx.chain.read_commit(&id).unwrap().unwrap();
        assert_eq!(record.message, "padded message");
        assert_eq!(record.id(), id);
    }

    struct RejectingHead;

    impl HeadStore for RejectingHead {
        fn head(&self) -> lvc_refs::Result<Option<ObjectId>> {
            Ok(None)
        }

        fn set_head(&self, _id: &ObjectId) -> lvc_refs::Result<()> {
            Err(lvc_refs::RefError::Io {
                path: "HEAD".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn head_write_failure_keeps_object_and_clears_index() {
        let objects = Arc::new(InMemoryObjectStore::new());
        let staging = StagingArea::new(objects.clone(), Arc::new(InMemoryIndexStore::new()));
        let chain = CommitChain::new(objects.clone(), Arc::new(RejectingHead));
        staging.stage("a.txt", b"hello").unwrap();

        let err = chain.commit_at(&staging, "first", ts(0)).unwrap_err();

        assert!(matches!(err, LedgerError::Ref(_)));
        assert!(staging.read().unwrap().is_empty());
        // Blob plus the commit object written before HEAD failed.
        assert_eq!(objects.len(), 2);
        assert_eq!(chain.head().unwrap(), None);
    }

    #[test]
    fn read_missing_commit_is_absent() {
        let fx = fixture();
        let id = ObjectId::from_hash([4; 20]);
        assert!(fx.chain.read_commit(&id).unwrap().is_none());
    }

    #[test]
    fn read_corrupt_commit_is_error() {
        let fx = fixture();
        let id = fx.objects.write(b"parent: not-a-hash\n").unwrap();
        let err = fx.chain.read_commit(&id).unwrap_err();
        assert!(matches!(err, LedgerError::CorruptCommit { .. }));
    }

    #[test]
    fn log_without_commits_is_empty() {
        let fx = fixture();
        assert!(fx.chain.log().unwrap().is_empty());
    }

    #[test]
    fn log_visits_chain_newest_first() {
        let fx = fixture();
        let ids: Vec<ObjectId> = (0..4)
            .map(|i| {
                let content = format!("v{i}");
                commit(&fx, &[("a.txt", content.as_str())], &format!("c{i}"), i)
            })
            .collect();

        let log = fx.chain.log().unwrap();
        assert_eq!(log.len(), 4);
        let logged: Vec<ObjectId> = log.iter().map(|e| e.id).collect();
        let expected: Vec<ObjectId> = ids.iter().rev().copied().collect();
        assert_eq!(logged, expected);
        assert_eq!(log[0].message, "c3");
        assert_eq!(log[3].parent, None);
    }

    #[test]
    fn log_fails_on_missing_parent() {
        let fx = fixture();
        let orphan = CommitRecord {
            parent: Some(ObjectId::from_hash([7; 20])),
            timestamp: ts(0),
            message: "orphan".into(),
            files: Default::default(),
        };
        let id = fx.objects.write(&orphan.encode()).unwrap();
        fx.head.set_head(&id).unwrap();

        let err = fx.chain.log().unwrap_err();
        assert!(matches!(
            err,
            LedgerError::MissingCommit { referenced_by: Some(child), .. } if child == id
        ));
    }

    #[test]
    fn log_fails_when_head_names_missing_commit() {
        let fx = fixture();
        fx.head.set_head(&ObjectId::from_hash([5; 20])).unwrap();
        let err = fx.chain.log().unwrap_err();
        assert!(matches!(err, LedgerError::MissingCommit { referenced_by: None, .. }));
    }

    fn store_with_parent(fx: &Fixture, id: ObjectId, parent: ObjectId) {
        let record = CommitRecord {
            parent: Some(parent),
            timestamp: ts(0),
            message: "looped".into(),
            files: Default::default(),
        };
        fx.objects.store(&id, &record.encode()).unwrap();
    }

    #[test]
    fn self_parented_commit_ends_the_walk() {
        let fx = fixture();
        let id = ObjectId::from_hash([0xab; 20]);
        store_with_parent(&fx, id, id);
        fx.head.set_head(&id).unwrap();

        let items: Vec<_> = fx.chain.history().unwrap().take(10).collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(
            &items[1],
            Err(LedgerError::Cycle { id: repeated, referenced_by: Some(child) })
                if *repeated == id && *child == id
        ));
        assert!(matches!(fx.chain.log(), Err(LedgerError::Cycle { .. })));
    }

    #[test]
    fn two_commit_loop_is_a_cycle() {
        let fx = fixture();
        let a = ObjectId::from_hash([0xaa; 20]);
        let b = ObjectId::from_hash([0xbb; 20]);
        store_with_parent(&fx, a, b);
        store_with_parent(&fx, b, a);
        fx.head.set_head(&a).unwrap();

        let err = fx.chain.log().unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Cycle { id, referenced_by: Some(child) } if id == a && child == b
        ));
    }
}
