//! Staging index for lvc.
//!
//! The staging index is the single mutable "pending change set": a mapping
//! from working-file path to the id of its last-staged content. It is
//! persisted as a flat text table and emptied after every commit attempt.
//!
//! # Key Types
//!
//! - [`StagingArea`] -- Stages file content into the object store and index
//! - [`IndexStore`] -- Persistence boundary for the index table
//! - [`FsIndexStore`] / [`InMemoryIndexStore`] -- File and in-memory backends
//! - [`StageOutcome`] -- Whether a stage call changed anything

pub mod codec;
pub mod error;
pub mod staging;
pub mod store;

pub use codec::{decode_index, encode_index};
pub use error::{IndexError, IndexResult};
pub use staging::{StageOutcome, StagingArea};
pub use store::{FsIndexStore, InMemoryIndexStore, IndexStore};
