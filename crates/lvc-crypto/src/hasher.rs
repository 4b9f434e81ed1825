use lvc_types::ObjectId;
use sha1::{Digest, Sha1};

/// SHA-1 content hasher.
///
/// Object ids are the plain digest of the stored bytes, with no header or
/// domain tag, so an id can be reproduced with any standard `sha1sum`.
pub struct ContentHasher;

impl ContentHasher {
    /// Hash raw bytes.
    pub fn hash(data: &[u8]) -> ObjectId {
        let mut hasher = Sha1::new();
        hasher.update(data);
        ObjectId::from_hash(hasher.finalize().into())
    }

    /// Verify that data produces the expected object id.
    pub fn verify(data: &[u8], expected: &ObjectId) -> bool {
        Self::hash(data) == *expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matches_known_digest() {
        assert_eq!(
            ContentHasher::hash(b"hello").to_hex(),
            "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
        );
        assert_eq!(
            ContentHasher::hash(b"").to_hex(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn verify_correct_data() {
        let id = ContentHasher::hash(b"test data");
        assert!(ContentHasher::verify(b"test data", &id));
    }

    #[test]
    fn verify_incorrect_data() {
        let id = ContentHasher::hash(b"original");
        assert!(!ContentHasher::verify(b"tampered", &id));
    }

    proptest! {
        #[test]
        fn hash_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(ContentHasher::hash(&data), ContentHasher::hash(&data.clone()));
        }
    }
}
