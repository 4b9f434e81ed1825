//! Diff engine for lvc.
//!
//! Compares a commit's manifest with its parent's and produces line-level
//! diffs of the affected files.
//!
//! # Key Types
//!
//! - [`FileChange`] -- Path-level change between two manifests (added/deleted/modified)
//! - [`BlobDiff`] / [`DiffHunk`] / [`DiffLine`] -- Line-level text diff
//! - [`CommitDiff`] / [`FileDiff`] -- Every changed file in a commit, renderable as a report

pub mod blob_diff;
pub mod commit_diff;
pub mod error;
pub mod manifest_diff;
pub mod text;

pub use blob_diff::{all_added, all_removed, diff_text, BlobDiff, DiffHunk, DiffLine};
pub use commit_diff::{CommitDiff, FileDiff};
pub use error::{DiffError, DiffResult};
pub use manifest_diff::{diff_manifests, FileChange};
pub use text::decode_text;
