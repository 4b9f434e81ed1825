//! Content hashing for lvc.
//!
//! Every object id, blob or commit, is the SHA-1 digest of the stored bytes.
//! All hashing wraps the `sha1` crate; no custom cryptography.

pub mod hasher;

pub use hasher::ContentHasher;
