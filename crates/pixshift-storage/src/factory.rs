use crate::{LocalStorage, MemoryStorage, Storage, StorageBackend, StorageResult};
use pixshift_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        StorageBackend::Local => {
            let storage = LocalStorage::new(config.local_storage_path()).await?;
            tracing::info!(
                base_path = %storage.base_path().display(),
                "Using local storage backend"
            );
            Ok(Arc::new(storage))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage backend; outputs are lost on restart");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixshift_core::PipelineConfig;

    #[tokio::test]
    async fn test_create_local_storage() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::new(PipelineConfig {
            local_storage_path: temp_dir.path().to_string_lossy().to_string(),
            ..Default::default()
        });

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
        assert!(temp_dir.path().join("converted").is_dir());
    }

    #[tokio::test]
    async fn test_create_memory_storage() {
        let config = Config::new(PipelineConfig {
            storage_backend: StorageBackend::Memory,
            ..Default::default()
        });

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Memory);
    }
}
