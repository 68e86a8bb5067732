use std::sync::Arc;

use crate::{
    entities::image::{ImageUpload, UploadedImage},
    errors::AppError,
    infrastructure::storage::generate_object_key,
    repositories::storage::{ObjectStorage, StoredObject},
};

pub struct ImageHandler {
    pub storage: Arc<dyn ObjectStorage>,
}

impl ImageHandler {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        ImageHandler { storage }
    }

    /// Validates the upload and stores it under a fresh random key.
    pub async fn upload_image(&self, upload: ImageUpload) -> Result<UploadedImage, AppError> {
        let content_type = upload.validate()?;
        let key = generate_object_key(&upload.extension(&content_type));
        let size = upload.bytes.len();

        let url = self.storage.put(&key, upload.bytes, &content_type).await?;
        tracing::info!(%key, size, %content_type, "Image uploaded");

        Ok(UploadedImage { url, key, content_type, size })
    }

    pub async fn fetch_image(&self, key: &str) -> Result<StoredObject, AppError> {
        Ok(self.storage.get(key).await?)
    }
}
