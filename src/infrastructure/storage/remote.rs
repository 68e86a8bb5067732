use async_trait::async_trait;
use reqwest::{header, Client};

use crate::{
    errors::StorageError,
    repositories::storage::{validate_object_key, ObjectStorage, StoredObject},
};

/// Hosted object storage reached over its HTTP API.
#[derive(Clone)]
pub struct RemoteStorage {
    client: Client,
    endpoint: String,
    bucket: String,
    api_key: String,
}

impl RemoteStorage {
    pub fn new(endpoint: &str, bucket: &str, api_key: &str) -> Self {
        RemoteStorage {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[async_trait]
impl ObjectStorage for RemoteStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        validate_object_key(key)?;

        let response = self
            .client
            .post(self.object_url(key))
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Object store rejected upload: {}", body);
            return Err(StorageError::Upstream(format!("upload failed with status {status}")));
        }

        Ok(self.public_url(key))
    }

    async fn get(&self, key: &str) -> Result<StoredObject, StorageError> {
        // public objects are fetched from the store directly
        Err(StorageError::NotFound(key.to_string()))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/object/public/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_points_at_public_bucket_path() {
        let storage = RemoteStorage::new("https://store.example.com/storage/v1/", "images", "key");
        assert_eq!(
            storage.public_url("a.png"),
            "https://store.example.com/storage/v1/object/public/images/a.png"
        );
        assert_eq!(storage.object_url("a.png"), "https://store.example.com/storage/v1/object/images/a.png");
    }
}
