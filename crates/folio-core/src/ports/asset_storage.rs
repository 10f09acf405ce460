//! Asset storage port.

use async_trait::async_trait;

use super::StorageError;

/// Stores uploaded image bytes and hands back a public URL.
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Store `bytes` under `suggested_path` (e.g. `portfolio/3f2a.jpg`).
    ///
    /// Returns the public URL the asset can be fetched from.
    async fn upload_asset(&self, bytes: Vec<u8>, suggested_path: &str)
    -> Result<String, StorageError>;
}
