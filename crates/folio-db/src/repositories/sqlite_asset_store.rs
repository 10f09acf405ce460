//! `SQLite` implementation of the `AssetStorage` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use folio_core::{AssetStorage, StorageError};

use super::row_mappers::format_datetime;

/// Stores uploaded bytes in the `assets` table.
///
/// Public URLs are `<public_base>/<path>`; serving them is left to whatever
/// sits in front of the database.
pub struct SqliteAssetStore {
    pool: SqlitePool,
    public_base: String,
}

impl SqliteAssetStore {
    /// Create a new asset store publishing under `public_base`.
    pub fn new(pool: SqlitePool, public_base: impl Into<String>) -> Self {
        let public_base = public_base.into().trim_end_matches('/').to_string();
        Self { pool, public_base }
    }

    pub fn public_url(&self, path: &str) -> String {
        format!("{}/{path}", self.public_base)
    }
}

/// Relative, slash-separated, no empty or dot segments.
fn validate_path(path: &str) -> Result<(), StorageError> {
    let valid = !path.is_empty()
        && !path.contains('\\')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidPath(path.to_string()))
    }
}

#[async_trait]
impl AssetStorage for SqliteAssetStore {
    async fn upload_asset(
        &self,
        bytes: Vec<u8>,
        suggested_path: &str,
    ) -> Result<String, StorageError> {
        validate_path(suggested_path)?;

        sqlx::query("INSERT INTO assets (path, bytes, uploaded_at) VALUES (?, ?, ?)")
            .bind(suggested_path)
            .bind(&bytes)
            .bind(format_datetime(&Utc::now()))
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        debug!(path = suggested_path, size = bytes.len(), "Stored asset");
        Ok(self.public_url(suggested_path))
    }
}
