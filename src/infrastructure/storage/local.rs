use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::{
    errors::StorageError,
    repositories::storage::{validate_object_key, ObjectStorage, StoredObject},
};

/// Files on local disk, served back by the `/uploads/{key}` route.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        LocalStorage {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<String, StorageError> {
        validate_object_key(key)?;

        fs::create_dir_all(&self.root).await?;
        fs::write(self.root.join(key), bytes).await?;

        Ok(self.public_url(key))
    }

    async fn get(&self, key: &str) -> Result<StoredObject, StorageError> {
        validate_object_key(key)?;

        let bytes = fs::read(self.root.join(key)).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(key.to_string()),
            _ => StorageError::Io(e),
        })?;

        let content_type = infer::get(&bytes)
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| {
                if key.ends_with(".svg") {
                    "image/svg+xml".to_string()
                } else {
                    "application/octet-stream".to_string()
                }
            });

        Ok(StoredObject { bytes, content_type })
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/uploads/{}", self.public_base_url, key)
    }
}
