//! Commit chain for lvc.
//!
//! This crate is the heart of lvc. It provides:
//! - [`CommitRecord`] with its single canonical encode/decode pair
//! - [`CommitChain`]: commit creation from the staging index, HEAD
//!   advancement, commit lookup, and history walks
//! - [`ChainValidator`]: full-chain integrity verification

pub mod chain;
pub mod error;
pub mod record;
pub mod validation;

pub use chain::{CommitChain, CommitOutcome, History, LogEntry};
pub use error::{LedgerError, LedgerResult};
pub use record::{CommitRecord, StoredCommit};
pub use validation::{ChainValidator, VerifyReport, Violation, ViolationKind};
