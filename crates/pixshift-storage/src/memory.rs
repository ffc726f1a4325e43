//! In-memory storage backend, used by tests and dry runs.

use crate::keys::generate_storage_key;
use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use pixshift_core::OutputCategory;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Storage that keeps every object in a shared map.
///
/// Clones share the same map, so a test can keep a handle and inspect what the
/// pipeline wrote.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<Mutex<BTreeMap<String, Bytes>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn objects(&self) -> StorageResult<MutexGuard<'_, BTreeMap<String, Bytes>>> {
        self.objects
            .lock()
            .map_err(|_| StorageError::ConfigError("Memory storage lock poisoned".to_string()))
    }

    /// Number of stored objects across all categories
    pub fn len(&self) -> usize {
        self.objects.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn store(
        &self,
        category: OutputCategory,
        extension: &str,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredObject> {
        let key = generate_storage_key(category, extension)?;
        let size = data.len();
        self.objects()?.insert(key.clone(), data);

        tracing::debug!(key = %key, size_bytes = size, "Memory storage write");

        Ok(StoredObject {
            location: format!("memory://{}", key),
            key,
        })
    }

    async fn load(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.objects()?
            .get(storage_key)
            .map(|b| b.to_vec())
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.objects()?.contains_key(storage_key))
    }

    async fn list(&self, category: OutputCategory) -> StorageResult<Vec<String>> {
        let prefix = format!("{}/", category.as_str());
        Ok(self
            .objects()?
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        if self.objects()?.remove(storage_key).is_some() {
            tracing::debug!(key = %storage_key, "Memory storage delete");
        }
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
