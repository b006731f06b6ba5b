//! Binary blob store contract.
//!
//! `put` hands back an opaque reference usable later for retrieval and
//! deletion. Deletion can fail; callers that replace assets treat such
//! failures as log-only (the primary operation never rolls back over a
//! stale blob).

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;
use uuid::Uuid;

/// Opaque blob reference.
pub type BlobRef = String;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlobError {
    #[error("blob not found: {0}")]
    NotFound(String),
}

/// A stored blob, as handed back on retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub trait BlobStore: Send + Sync {
    fn put(&self, bytes: &[u8], content_type: &str) -> BlobRef;

    fn get(&self, reference: &str) -> Option<StoredBlob>;

    fn delete(&self, reference: &str) -> Result<(), BlobError>;
}

/// In-memory blob store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    inner: RwLock<HashMap<String, StoredBlob>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.inner
            .read()
            .map(|map| map.contains_key(reference))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for InMemoryBlobStore {
    fn put(&self, bytes: &[u8], content_type: &str) -> BlobRef {
        let reference = format!("blob://{}", Uuid::now_v7());
        if let Ok(mut map) = self.inner.write() {
            map.insert(
                reference.clone(),
                StoredBlob {
                    content_type: content_type.to_string(),
                    bytes: bytes.to_vec(),
                },
            );
        }
        reference
    }

    fn get(&self, reference: &str) -> Option<StoredBlob> {
        let map = self.inner.read().ok()?;
        map.get(reference).cloned()
    }

    fn delete(&self, reference: &str) -> Result<(), BlobError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| BlobError::NotFound(reference.to_string()))?;
        map.remove(reference)
            .map(|_| ())
            .ok_or_else(|| BlobError::NotFound(reference.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete_round_trip() {
        let store = InMemoryBlobStore::new();
        let reference = store.put(b"pdf bytes", "application/pdf");
        assert!(reference.starts_with("blob://"));

        let blob = store.get(&reference).unwrap();
        assert_eq!(blob.content_type, "application/pdf");
        assert_eq!(blob.bytes, b"pdf bytes");

        store.delete(&reference).unwrap();
        assert!(store.get(&reference).is_none());
    }

    #[test]
    fn deleting_an_unknown_reference_fails() {
        let store = InMemoryBlobStore::new();
        let err = store.delete("blob://nope").unwrap_err();
        assert_eq!(err, BlobError::NotFound("blob://nope".into()));
    }

    #[test]
    fn each_put_gets_a_distinct_reference() {
        let store = InMemoryBlobStore::new();
        let a = store.put(b"a", "application/zip");
        let b = store.put(b"a", "application/zip");
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }
}
