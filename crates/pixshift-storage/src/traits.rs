//! Storage abstraction trait
//!
//! This module defines the Storage trait that every output sink implements.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use pixshift_core::OutputCategory;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Reference to a persisted object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Backend-independent key, `{category}/{uuid}.{extension}`
    pub key: String,
    /// Where the backend put it (a filesystem path, or `memory://{key}`)
    pub location: String,
}

/// Output sink trait
///
/// Backends must be safe for concurrent use. Every `store` call must produce a
/// new, non-colliding destination.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under a freshly generated key in `category`.
    async fn store(
        &self,
        category: OutputCategory,
        extension: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredObject>;

    /// Read an object back by its key
    async fn load(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Keys currently stored in `category`, sorted
    async fn list(&self, category: OutputCategory) -> StorageResult<Vec<String>>;

    /// Remove an object. Deleting a missing key is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
