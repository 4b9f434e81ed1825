//! Content-addressed object storage for lvc.
//!
//! This crate implements a hash-keyed object store: every blob (file content
//! or serialized commit record) is stored once under the hex SHA-1 digest of
//! its bytes.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`FsObjectStore`] -- one file per object inside a directory
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written; there is no update or delete.
//! 2. Storing an id that is already present is a no-op (dedup by presence).
//! 3. The store never interprets object contents -- it is a pure key-value store.
//! 4. All I/O errors are propagated with the offending path, never retried.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use traits::ObjectStore;
