//! Foundation types for lvc.
//!
//! This crate provides the identifiers and value types shared by every other
//! lvc crate.
//!
//! # Key Types
//!
//! - [`ObjectId`]: Content-addressed identifier (160-bit digest, hex keyed)
//! - [`Manifest`]: Insertion-ordered mapping of file path to blob id
//! - [`CommitTimestamp`]: Commit time in the fixed human-readable format

pub mod error;
pub mod manifest;
pub mod object;
pub mod temporal;

pub use error::ParseIdError;
pub use manifest::{Manifest, ManifestEntry};
pub use object::ObjectId;
pub use temporal::CommitTimestamp;
