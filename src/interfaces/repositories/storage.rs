use async_trait::async_trait;

use crate::errors::StorageError;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Where uploaded images are written and how clients reach them.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores the object and returns its public URL.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError>;

    /// Reads an object back. Only stores that serve files themselves support this.
    async fn get(&self, key: &str) -> Result<StoredObject, StorageError>;

    fn public_url(&self, key: &str) -> String;
}

/// Keys are flat file names: ASCII alphanumerics, `-`, `_` and `.`, with no
/// leading dot.
pub fn validate_object_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && !key.contains("..")
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
