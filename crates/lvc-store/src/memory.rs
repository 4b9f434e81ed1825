use std::collections::HashMap;
use std::sync::RwLock;

use lvc_types::ObjectId;

use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// Object store held entirely in memory. Used by unit tests across the
/// workspace in place of an objects directory.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    blobs: RwLock<HashMap<ObjectId, Vec<u8>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct objects held.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop an object, simulating a damaged objects directory.
    pub fn forget(&self, id: &ObjectId) -> bool {
        self.blobs.write().expect("lock poisoned").remove(id).is_some()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.blobs.read().expect("lock poisoned").get(id).cloned())
    }

    fn store(&self, id: &ObjectId, data: &[u8]) -> StoreResult<bool> {
        let mut blobs = self.blobs.write().expect("lock poisoned");
        if blobs.contains_key(id) {
            return Ok(false);
        }
        blobs.insert(*id, data.to_vec());
        Ok(true)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.blobs.read().expect("lock poisoned").contains_key(id))
    }
}
