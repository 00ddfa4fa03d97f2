use std::collections::HashSet;

use async_trait::async_trait;
use serde::Serialize;

use super::error::StorageError;
use super::name::AssetName;

/// An asset that has just been written to the store.
#[derive(Debug, Clone, Serialize)]
pub struct StoredAsset {
    pub name: AssetName,
    /// Public URL (`/uploads/<name>`).
    pub url: String,
    /// Size in bytes.
    pub size: u64,
}

/// Storage for uploaded assets, addressed by their `/uploads/...` URL.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store bytes under a freshly generated name derived from `original_name`.
    ///
    /// Empty payloads are rejected before anything touches the disk.
    async fn store(
        &self,
        data: &[u8],
        original_name: Option<&str>,
    ) -> Result<StoredAsset, StorageError>;

    /// Delete the asset behind `url`.
    ///
    /// Returns `true` if a file was removed, `false` if the URL is not an asset
    /// URL or the file is already gone.
    async fn delete(&self, url: &str) -> Result<bool, StorageError>;

    /// URLs of every asset currently present in the store.
    async fn list_stored_urls(&self) -> Result<HashSet<String>, StorageError>;
}
