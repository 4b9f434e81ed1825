use lvc_crypto::ContentHasher;
use lvc_types::ObjectId;

use crate::error::{StoreError, StoreResult};

/// Content-addressed, append-only object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. The same id always names the same
///   bytes.
/// - `store` on an id that already exists is a no-op; presence is checked by
///   id, never by comparing bytes.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read an object by id.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>>;

    /// Store `data` under `id` unless an object with that id already exists.
    ///
    /// Returns `true` if a new object was written.
    fn store(&self, id: &ObjectId, data: &[u8]) -> StoreResult<bool>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read an object that must exist.
    fn load(&self, id: &ObjectId) -> StoreResult<Vec<u8>> {
        self.read(id)?.ok_or(StoreError::NotFound(*id))
    }

    /// Hash `data`, store it, and return its id.
    fn write(&self, data: &[u8]) -> StoreResult<ObjectId> {
        let id = ContentHasher::hash(data);
        self.store(&id, data)?;
        Ok(id)
    }
}
