//! Pixshift Storage Library
//!
//! This crate provides the output sink abstraction and its implementations for
//! the local filesystem and for process memory.
//!
//! # Storage key format
//!
//! Every backend uses the same layout: `{category}/{uuid}.{extension}`, where
//! category is one of `converted`, `resized`, `compressed` or `uploads`. A fresh
//! v4 UUID per call keeps concurrent writers from colliding without any locking.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use pixshift_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
