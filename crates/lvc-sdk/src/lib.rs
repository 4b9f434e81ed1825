//! High-level SDK for lvc.
//!
//! [`Repository`] bundles the object store, staging index, HEAD and commit
//! chain behind one handle. This is the main entry point for applications
//! embedding lvc.

pub mod config;
pub mod error;
pub mod outcome;
pub mod repository;

pub use config::{RepoConfig, RepoLayout};
pub use error::{ErrorKind, SdkError, SdkResult};
pub use outcome::{AddOutcome, DiffOutcome, InitOutcome};
pub use repository::Repository;

// Re-export key types
pub use lvc_diff::{BlobDiff, CommitDiff, DiffLine, FileDiff};
pub use lvc_ledger::{CommitOutcome, CommitRecord, LogEntry, VerifyReport, Violation};
pub use lvc_store::ObjectStore;
pub use lvc_types::{CommitTimestamp, Manifest, ObjectId};
