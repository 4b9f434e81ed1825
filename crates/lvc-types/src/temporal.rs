use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// `strftime` pattern used in commit records, e.g. `Mon Jan 02 15:04:05 2006`.
pub const COMMIT_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Commit creation time in the fixed human-readable format.
///
/// The text is part of the hashed commit serialization, so it is kept
/// verbatim once produced or parsed. Local time, no zone suffix.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitTimestamp(String);

impl CommitTimestamp {
    /// Timestamp for the current local wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Format an arbitrary instant.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self(dt.format(COMMIT_TIME_FORMAT).to_string())
    }

    /// Wrap text read back from a stored commit without reinterpreting it.
    pub fn from_raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The formatted text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CommitTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitTimestamp({})", self.0)
    }
}

impl fmt::Display for CommitTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
