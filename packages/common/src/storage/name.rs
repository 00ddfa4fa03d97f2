use std::fmt;
use std::path::Path;

use serde::{Serialize, Serializer};
use uuid::Uuid;

use super::error::StorageError;

/// URL prefix under which every stored asset is addressed and served.
pub const URL_PREFIX: &str = "/uploads/";

const MAX_EXTENSION_LEN: usize = 16;

/// Flat file name of a stored asset: an opaque token plus an optional
/// `.ext` suffix carried over from the uploaded file name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AssetName(String);

impl AssetName {
    /// Generate a fresh name for an upload, keeping the original extension.
    ///
    /// Uniqueness relies on the randomness of a v4 UUID; there is no retry on
    /// collision.
    pub fn generate(original_name: Option<&str>) -> Self {
        let token = Uuid::new_v4().to_string();
        match original_name.and_then(extension_of) {
            Some(ext) => Self(format!("{token}.{ext}")),
            None => Self(token),
        }
    }

    /// Parse the file name out of an asset URL (`/uploads/<name>`).
    ///
    /// Anything that could escape the upload directory is rejected.
    pub fn from_url(url: &str) -> Result<Self, StorageError> {
        let name = url
            .strip_prefix(URL_PREFIX)
            .ok_or_else(|| StorageError::InvalidUrl(url.to_string()))?;
        Self::from_file_name(name).map_err(|_| StorageError::InvalidUrl(url.to_string()))
    }

    /// Wrap a file name found in the upload directory.
    pub fn from_file_name(name: &str) -> Result<Self, StorageError> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0')
        {
            return Err(StorageError::InvalidUrl(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn file_name(&self) -> &str {
        &self.0
    }

    /// The extension without the leading dot, if any.
    pub fn extension(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, ext)| ext)
    }

    /// The public URL of this asset.
    pub fn url(&self) -> String {
        format!("{URL_PREFIX}{}", self.0)
    }
}

/// Lowercased extension of an uploaded file name, kept only when it is short
/// and plain alphanumeric.
fn extension_of(original: &str) -> Option<String> {
    let base = Path::new(original).file_name()?.to_str()?;
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty()
        || ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

impl fmt::Debug for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetName({})", self.0)
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for AssetName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url())
    }
}
