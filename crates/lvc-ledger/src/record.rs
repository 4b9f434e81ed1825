//! Commit records and their canonical text form.
//!
//! A commit's id is the digest of its serialized bytes, so the layout below
//! is reproduced byte for byte:
//!
//! ```text
//! parent: <hash or None>
//! timestamp: <Mon Jan 02 15:04:05 2006>
//! message: <message text>
//!
//! files
//!     <path>: <hash>
//! ```
//!
//! Every entry line ends with `\n`; the blank line separates the header from
//! the `files` marker. [`CommitRecord::encode`] and [`CommitRecord::decode`]
//! are the only places that know this layout.

use lvc_crypto::ContentHasher;
use lvc_types::{CommitTimestamp, Manifest, ObjectId};
use serde::Serialize;

const PARENT_KEY: &str = "parent:";
const TIMESTAMP_KEY: &str = "timestamp:";
const MESSAGE_KEY: &str = "message:";
const FILES_MARKER: &str = "files";
const NO_PARENT: &str = "None";
const ENTRY_INDENT: &str = "    ";

/// A single commit: parent pointer, time, message, and file manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// Previous commit; `None` only for the first commit in the chain.
    pub parent: Option<ObjectId>,
    pub timestamp: CommitTimestamp,
    pub message: String,
    /// Snapshot of the staging index at commit time.
    pub files: Manifest,
}

impl CommitRecord {
    /// Canonical serialization. The commit id is the digest of these bytes.
    pub fn encode(&self) -> Vec<u8> {
        let parent = match &self.parent {
            Some(id) => id.to_hex(),
            None => NO_PARENT.to_string(),
        };

        let mut out = format!(
            "{PARENT_KEY} {parent}\n{TIMESTAMP_KEY} {}\n{MESSAGE_KEY} {}\n\n{FILES_MARKER}\n",
            self.timestamp, self.message
        );
        for entry in &self.files {
            out.push_str(&format!("{ENTRY_INDENT}{}: {}\n", entry.path, entry.id));
        }
        out.into_bytes()
    }

    /// Digest of the canonical serialization.
    pub fn id(&self) -> ObjectId {
        ContentHasher::hash(&self.encode())
    }

    /// Parse a stored commit.
    ///
    /// Lines are trimmed. Before the `files` marker, lines are matched by
    /// their key prefix (value taken after the first `:`); after it, every
    /// line containing `:` is a `path: hash` entry. Unknown lines are skipped.
    pub fn decode(data: &[u8]) -> Result<Self, String> {
        let text = std::str::from_utf8(data).map_err(|e| format!("not UTF-8: {e}"))?;

        let mut parent = None;
        let mut timestamp = CommitTimestamp::from_raw("");
        let mut message = String::new();
        let mut files = Manifest::new();
        let mut in_files = false;

        for line in text.lines().map(str::trim) {
            if in_files {
                if let Some((path, hash)) = line.rsplit_once(':') {
                    let id = ObjectId::from_hex(hash)
                        .map_err(|e| format!("bad manifest entry {line:?}: {e}"))?;
                    files.insert(path.trim(), id);
                }
            } else if let Some(value) = line.strip_prefix(PARENT_KEY) {
                let value = value.trim();
                parent = if value == NO_PARENT || value.is_empty() {
                    None
                } else {
                    Some(ObjectId::from_hex(value).map_err(|e| format!("bad parent: {e}"))?)
                };
            } else if let Some(value) = line.strip_prefix(TIMESTAMP_KEY) {
                timestamp = CommitTimestamp::from_raw(value.trim());
            } else if let Some(value) = line.strip_prefix(MESSAGE_KEY) {
                message = value.trim().to_string();
            } else if line == FILES_MARKER {
                in_files = true;
            }
        }

        Ok(Self {
            parent,
            timestamp,
            message,
            files,
        })
    }
}

/// A commit as read from the store: its id, raw bytes, and parsed form.
///
/// Chain verification hashes the raw bytes, not a re-encoding, so records
/// written by other tools still verify.
#[derive(Clone, Debug)]
pub struct StoredCommit {
    pub id: ObjectId,
    pub raw: Vec<u8>,
    pub record: CommitRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn timestamp() -> CommitTimestamp {
        CommitTimestamp::from_datetime(&Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap())
    }

    fn hello() -> ObjectId {
        ContentHasher::hash(b"hello")
    }

    fn root_record() -> CommitRecord {
        CommitRecord {
            parent: None,
            timestamp: timestamp(),
            message: "first".into(),
            files: [("a.txt", hello())].into_iter().collect(),
        }
    }

    #[test]
    fn encode_matches_canonical_layout() {
        let text = String::from_utf8(root_record().encode()).unwrap();
        assert_eq!(
            text,
            "parent: None\n\
             timestamp: Mon Jan 02 15:04:05 2006\n\
             message: first\n\
             \n\
             files\n    a.txt: aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d\n"
        );
    }

    #[test]
    fn id_is_digest_of_encoding() {
        let record = root_record();
        assert_eq!(record.id(), ContentHasher::hash(&record.encode()));
    }

    #[test]
    fn child_encodes_parent_hash() {
        let parent = root_record().id();
        let child = CommitRecord {
            parent: Some(parent),
            ..root_record()
        };
        let text = String::from_utf8(child.encode()).unwrap();
        assert!(text.starts_with(&format!("parent: {parent}\n")));
        assert_ne!(child.id(), parent);
    }

    #[test]
    fn decode_recovers_every_field() {
        let parent = ObjectId::from_hash([9; 20]);
        let record = CommitRecord {
            parent: Some(parent),
            timestamp: timestamp(),
            message: "second: with colon".into(),
            files: [("a.txt", hello()), ("dir/b.txt", ObjectId::from_hash([2; 20]))]
                .into_iter()
                .collect(),
        };

        let decoded = CommitRecord::decode(&record.encode()).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.encode(), record.encode());
    }

    #[test]
    fn decode_maps_none_parent_to_absent() {
        let decoded = CommitRecord::decode(&root_record().encode()).unwrap();
        assert_eq!(decoded.parent, None);
        assert_eq!(decoded.timestamp.as_str(), "Mon Jan 02 15:04:05 2006");
    }

    #[test]
    fn decode_ignores_lines_without_colon_in_manifest() {
        let text = format!(
            "parent: None\ntimestamp: t\nmessage: m\n\nfiles\n    stray\n    a.txt: {}\n",
            hello()
        );
        let decoded = CommitRecord::decode(text.as_bytes()).unwrap();
        assert_eq!(decoded.files.len(), 1);
        assert_eq!(decoded.files.get("a.txt"), Some(&hello()));
    }

    #[test]
    fn decode_with_empty_manifest() {
        let decoded = CommitRecord::decode(b"parent: None\ntimestamp: t\nmessage: m\n\nfiles\n").unwrap();
        assert!(decoded.files.is_empty());
    }

    #[test]
    fn decode_rejects_bad_parent() {
        let err = CommitRecord::decode(b"parent: zzz\ntimestamp: t\nmessage: m\n\nfiles\n")
            .unwrap_err();
        assert!(err.contains("bad parent"));
    }

    #[test]
    fn decode_rejects_non_utf8() {
        assert!(CommitRecord::decode(&[0xff, 0xfe, 0x00]).is_err());
    }
}
