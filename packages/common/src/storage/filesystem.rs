use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use super::error::StorageError;
use super::name::AssetName;
use super::traits::{AssetStore, StoredAsset};

/// Suffix of the scratch directory kept next to the root.
const TEMP_SUFFIX: &str = ".tmp";

/// Filesystem-backed asset store.
///
/// Assets live flat in `{root}/{name}`. The root is created lazily on the
/// first write, so a store over a missing directory simply reports no assets.
///
/// In-flight writes go to a sibling scratch directory (`{parent}/.{root}.tmp`)
/// so the served root only ever holds complete assets. Being on the same
/// filesystem as the root keeps the final rename atomic.
pub struct FilesystemAssetStore {
    root: PathBuf,
    scratch: PathBuf,
    max_size: u64,
}

impl FilesystemAssetStore {
    pub fn new(root: PathBuf, max_size: u64) -> Self {
        let scratch = scratch_dir(&root);
        Self {
            root,
            scratch,
            max_size,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch
    }

    /// Remove temp files left behind by writes that never finished, e.g.
    /// after a crash. Call once at startup, before serving uploads.
    pub async fn clear_scratch(&self) -> Result<usize, StorageError> {
        let mut entries = match fs::read_dir(&self.scratch).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }
        if removed > 0 {
            warn!(removed, dir = %self.scratch.display(), "removed stale upload temp files");
        }
        Ok(removed)
    }

    fn asset_path(&self, name: &AssetName) -> PathBuf {
        self.root.join(name.file_name())
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.scratch.join(uuid::Uuid::new_v4().to_string())
    }
}

fn scratch_dir(root: &Path) -> PathBuf {
    match root.file_name() {
        Some(name) => {
            let mut scratch = std::ffi::OsString::from(".");
            scratch.push(name);
            scratch.push(TEMP_SUFFIX);
            root.with_file_name(scratch)
        }
        // A root like `/` has no sibling; fall back to a hidden child.
        None => root.join(TEMP_SUFFIX),
    }
}

#[async_trait]
impl AssetStore for FilesystemAssetStore {
    async fn store(
        &self,
        data: &[u8],
        original_name: Option<&str>,
    ) -> Result<StoredAsset, StorageError> {
        if data.is_empty() {
            return Err(StorageError::EmptyPayload);
        }
        let size = data.len() as u64;
        if size > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: size,
                limit: self.max_size,
            });
        }

        fs::create_dir_all(&self.root).await?;
        fs::create_dir_all(&self.scratch).await?;

        let name = AssetName::generate(original_name);
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        // Overwrites on a (practically impossible) name collision.
        if let Err(e) = fs::rename(&temp_path, self.asset_path(&name)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(StoredAsset {
            url: name.url(),
            name,
            size,
        })
    }

    async fn delete(&self, url: &str) -> Result<bool, StorageError> {
        let name = match AssetName::from_url(url) {
            Ok(name) => name,
            Err(_) => {
                debug!(url, "ignoring delete of non-asset url");
                return Ok(false);
            }
        };
        match fs::remove_file(self.asset_path(&name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_stored_urls(&self) -> Result<HashSet<String>, StorageError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(e.into()),
        };

        let mut urls = HashSet::new();
        while let Some(entry) = entries.next_entry().await? {
            // Follows symlinks; a dangling link is not an asset.
            match fs::metadata(entry.path()).await {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => continue,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                warn!(path = %entry.path().display(), "skipping non UTF-8 asset name");
                continue;
            };
            match AssetName::from_file_name(file_name) {
                Ok(name) => {
                    urls.insert(name.url());
                }
                Err(e) => warn!("skipping asset: {e}"),
            }
        }
        Ok(urls)
    }
}
