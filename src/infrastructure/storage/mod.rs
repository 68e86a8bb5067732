pub mod local;
pub mod remote;

use std::sync::Arc;

use rand::{distributions::Alphanumeric, Rng};

use crate::{
    repositories::storage::ObjectStorage,
    settings::{AppConfig, StorageBackend},
};

use self::{local::LocalStorage, remote::RemoteStorage};

/// Picks the configured backend. `AppConfig::validate` guarantees the remote
/// settings are present.
pub fn build_storage(config: &AppConfig) -> Arc<dyn ObjectStorage> {
    match (&config.storage_backend, &config.storage_endpoint, &config.storage_api_key) {
        (StorageBackend::Remote, Some(endpoint), Some(api_key)) => {
            Arc::new(RemoteStorage::new(endpoint, &config.storage_bucket, api_key))
        }
        (StorageBackend::Remote, _, _) => {
            tracing::warn!("Remote storage selected without endpoint or key, using local uploads");
            Arc::new(LocalStorage::new(&config.upload_dir, &config.public_base_url))
        }
        (StorageBackend::Local, _, _) => Arc::new(LocalStorage::new(&config.upload_dir, &config.public_base_url)),
    }
}

/// `{unix_millis}-{random}.{ext}`
pub fn generate_object_key(extension: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect::<String>()
        .to_ascii_lowercase();

    format!("{}-{}.{}", chrono::Utc::now().timestamp_millis(), suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::storage::validate_object_key;

    #[test]
    fn generated_keys_are_unique_and_valid() {
        let a = generate_object_key("png");
        let b = generate_object_key("png");

        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
        assert!(validate_object_key(&a).is_ok());
    }
}
