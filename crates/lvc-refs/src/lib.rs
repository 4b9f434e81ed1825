//! Reference management for lvc.
//!
//! lvc keeps a single reference: HEAD, a mutable pointer holding the id of
//! the most recent commit, or nothing before the first commit. Commits form a
//! backward-only chain from there.
//!
//! # Modules
//!
//! - [`error`]: Error types for ref operations
//! - [`traits`]: The [`HeadStore`] trait defining the storage interface
//! - [`fs`]: File-backed [`FsHeadStore`]
//! - [`memory`]: In-memory [`InMemoryHeadStore`] for tests

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{RefError, Result};
pub use fs::FsHeadStore;
pub use memory::InMemoryHeadStore;
pub use traits::HeadStore;
