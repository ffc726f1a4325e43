//! Shared key generation for storage backends.

use crate::traits::{StorageError, StorageResult};
use pixshift_core::OutputCategory;
use uuid::Uuid;

/// Generate a unique storage key `{category}/{uuid}.{extension}`.
///
/// The extension must be non-empty ASCII alphanumeric; it is lowercased.
pub fn generate_storage_key(category: OutputCategory, extension: &str) -> StorageResult<String> {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(StorageError::InvalidKey(format!(
            "Invalid file extension: {:?}",
            extension
        )));
    }

    Ok(format!(
        "{}/{}.{}",
        category.as_str(),
        Uuid::new_v4(),
        extension.to_ascii_lowercase()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let key = generate_storage_key(OutputCategory::Resized, ".PNG").unwrap();
        assert!(key.starts_with("resized/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn test_keys_are_unique() {
        let a = generate_storage_key(OutputCategory::Converted, "jpeg").unwrap();
        let b = generate_storage_key(OutputCategory::Converted, "jpeg").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_bad_extension() {
        assert!(generate_storage_key(OutputCategory::Uploads, "").is_err());
        assert!(generate_storage_key(OutputCategory::Uploads, "../etc").is_err());
        assert!(generate_storage_key(OutputCategory::Uploads, "p/ng").is_err());
    }
}
