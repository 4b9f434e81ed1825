//! Blob-level diff: line-by-line comparison of file contents.
//!
//! Uses the `similar` crate (Myers diff algorithm) to produce structured
//! hunks. Hunks carry no context lines; each one is a run of removals
//! followed by a run of additions.

use std::fmt::Write as _;

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// The result of diffing two texts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BlobDiff {
    /// The diff hunks.
    pub hunks: Vec<DiffHunk>,
}

impl BlobDiff {
    /// Returns `true` if the two texts have the same lines.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }

    /// Render as a unified diff with `a/<path>` and `b/<path>` headers.
    ///
    /// Returns an empty string when there is no difference. Lines are joined
    /// by `\n` with no trailing newline.
    pub fn render_unified(&self, path: &str) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut out = format!("--- a/{path}\n+++ b/{path}");
        for hunk in &self.hunks {
            let _ = write!(
                out,
                "\n@@ -{} +{} @@",
                unified_range(hunk.old_start, hunk.old_count),
                unified_range(hunk.new_start, hunk.new_count)
            );
            for line in &hunk.lines {
                out.push('\n');
                out.push_str(&line.to_string());
            }
        }
        out
    }
}

/// A contiguous region of changes in a diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffHunk {
    /// Zero-based index of the first old line this hunk covers.
    pub old_start: usize,
    /// Number of lines from the old content in this hunk.
    pub old_count: usize,
    /// Zero-based index of the first new line this hunk covers.
    pub new_start: usize,
    /// Number of lines from the new content in this hunk.
    pub new_count: usize,
    /// The individual diff lines in this hunk.
    pub lines: Vec<DiffLine>,
}

/// A single changed line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "text", rename_all = "snake_case")]
pub enum DiffLine {
    /// A line added in the new content.
    Added(String),
    /// A line removed from the old content.
    Removed(String),
}

impl std::fmt::Display for DiffLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added(text) => write!(f, "+{text}"),
            Self::Removed(text) => write!(f, "-{text}"),
        }
    }
}

/// Compute a line-by-line diff between two texts.
///
/// Line terminators are not part of the compared lines, so `"a"` and `"a\n"`
/// compare equal.
pub fn diff_text(old: &str, new: &str) -> BlobDiff {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    if old_lines == new_lines {
        return BlobDiff::default();
    }

    let text_diff = TextDiff::from_slices(&old_lines, &new_lines);

    let mut hunks = Vec::new();
    for group in text_diff.grouped_ops(0) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_start = first.old_range().start;
        let new_start = first.new_range().start;

        let mut lines = Vec::new();
        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().to_string();
                match change.tag() {
                    ChangeTag::Delete => lines.push(DiffLine::Removed(text)),
                    ChangeTag::Insert => lines.push(DiffLine::Added(text)),
                    ChangeTag::Equal => {}
                }
            }
        }
        if lines.is_empty() {
            continue;
        }

        hunks.push(DiffHunk {
            old_start,
            old_count: last.old_range().end - old_start,
            new_start,
            new_count: last.new_range().end - new_start,
            lines,
        });
    }

    BlobDiff { hunks }
}

/// Every line of `text` as an addition, for a newly added file.
pub fn all_added(text: &str) -> Vec<DiffLine> {
    text.lines().map(|l| DiffLine::Added(l.to_string())).collect()
}

/// Every line of `text` as a removal, for a deleted file.
pub fn all_removed(text: &str) -> Vec<DiffLine> {
    text.lines().map(|l| DiffLine::Removed(l.to_string())).collect()
}

/// Range in unified hunk header form: `start` alone for one line,
/// `start,count` otherwise, with an empty range naming the line before it.
fn unified_range(start: usize, count: usize) -> String {
    match count {
        1 => format!("{}", start + 1),
        0 => format!("{start},0"),
        _ => format!("{},{count}", start + 1),
    }
}
