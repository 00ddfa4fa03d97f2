mod error;
mod name;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use name::{AssetName, URL_PREFIX};
pub use traits::{AssetStore, StoredAsset};
