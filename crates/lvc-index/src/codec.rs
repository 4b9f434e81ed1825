//! Text encoding of the staging index.
//!
//! One entry per line, `path:hash`, entries joined by `\n` with no trailing
//! newline. An empty file is an empty index.

use lvc_types::{Manifest, ObjectId};
use tracing::warn;

/// Render a manifest as index file text.
pub fn encode_index(manifest: &Manifest) -> String {
    manifest
        .iter()
        .map(|e| format!("{}:{}", e.path, e.id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse index file text.
///
/// Parsing is tolerant: lines without a `:` and lines whose hash is not a
/// digest are skipped. The hash is taken after the last `:` so paths may
/// themselves contain colons. A repeated path keeps its last hash.
pub fn decode_index(text: &str) -> Manifest {
    let mut manifest = Manifest::new();
    for (lineno, line) in text.lines().enumerate() {
        let Some((path, hash)) = line.rsplit_once(':') else {
            continue;
        };
        match ObjectId::from_hex(hash) {
            Ok(id) => {
                manifest.insert(path, id);
            }
            Err(e) => {
                warn!(line = lineno + 1, error = %e, "skipping malformed index entry");
            }
        }
    }
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HELLO: &str = "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d";
    const EMPTY: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";

    #[test]
    fn encode_joins_lines_without_trailing_newline() {
        let manifest: Manifest = [
            ("a.txt", ObjectId::from_hex(HELLO).unwrap()),
            ("dir/b.txt", ObjectId::from_hex(EMPTY).unwrap()),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            encode_index(&manifest),
            format!("a.txt:{HELLO}\ndir/b.txt:{EMPTY}")
        );
    }

    #[test]
    fn empty_text_is_empty_index() {
        assert!(decode_index("").is_empty());
        assert_eq!(encode_index(&Manifest::new()), "");
    }

    #[test]
    fn lines_without_colon_are_ignored() {
        let text = format!("garbage line\na.txt:{HELLO}\n\n");
        let manifest = decode_index(&text);
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get("a.txt").unwrap().to_hex(), HELLO);
    }

    #[test]
    fn malformed_hashes_are_ignored() {
        let text = format!("a.txt:nothex\nb.txt:{EMPTY}");
        let manifest = decode_index(&text);
        assert!(!manifest.contains("a.txt"));
        assert!(manifest.contains("b.txt"));
    }

    #[test]
    fn hash_whitespace_is_trimmed_and_colon_paths_survive() {
        let text = format!("C:/work/a.txt: {HELLO}\r\n");
        let manifest = decode_index(&text);
        assert_eq!(manifest.get("C:/work/a.txt").unwrap().to_hex(), HELLO);
    }

    #[test]
    fn repeated_path_keeps_last_hash() {
        let text = format!("a.txt:{HELLO}\na.txt:{EMPTY}");
        let manifest = decode_index(&text);
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get("a.txt").unwrap().to_hex(), EMPTY);
    }

    proptest! {
        #[test]
        fn decode_never_panics(text in "\\PC*") {
            let _ = decode_index(&text);
        }

        #[test]
        fn decoded_entries_survive_reencoding(
            paths in proptest::collection::vec("[a-z]{1,8}(/[a-z]{1,8})?\\.txt", 0..8),
        ) {
            let id = ObjectId::from_hex(HELLO).unwrap();
            let manifest: Manifest = paths.iter().map(|p| (p.as_str(), id)).collect();
            prop_assert_eq!(decode_index(&encode_index(&manifest)), manifest);
        }
    }
}
