//! Port trait implementations for `RestClient`.
//!
//! Maps internal `RestError`s onto the core repository and storage errors.

use async_trait::async_trait;
use folio_core::{
    AssetStorage, CatalogItemPatch, CatalogRecord, CatalogRepository, Category, NewCatalogItem,
    NewTimelineEntry, RepositoryError, StorageError, TimelineEntry, TimelineRepository,
};

use crate::client::RestClient;
use crate::error::RestError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `RestError` to core `RepositoryError`.
fn map_error(err: RestError) -> RepositoryError {
    match err {
        RestError::NotFound { what } => RepositoryError::NotFound(what),
        RestError::ApiRequestFailed {
            status,
            url,
            message,
        } => match status {
            404 => RepositoryError::NotFound(url),
            409 => RepositoryError::AlreadyExists(message),
            400 | 422 => RepositoryError::Constraint(message),
            408 | 504 => RepositoryError::Timeout(url),
            _ => RepositoryError::Storage(format!("status {status} from {url}: {message}")),
        },
        RestError::Timeout { url } => RepositoryError::Timeout(url),
        RestError::InvalidResponse { message } => RepositoryError::Serialization(message),
        RestError::JsonParse(e) => RepositoryError::Serialization(e.to_string()),
        RestError::Network(e) => RepositoryError::Storage(e.to_string()),
        RestError::InvalidUrl(e) => RepositoryError::Storage(e.to_string()),
    }
}

/// Convert internal `RestError` to core `StorageError`.
fn map_storage_error(err: RestError) -> StorageError {
    StorageError::Upload(err.to_string())
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend> CatalogRepository for RestClient<B> {
    async fn fetch_items(&self, category: Category) -> Result<Vec<CatalogRecord>, RepositoryError> {
        self.list_items(category).await.map_err(map_error)
    }

    async fn fetch_item(&self, id: &str) -> Result<CatalogRecord, RepositoryError> {
        self.get_item(id).await.map_err(map_error)
    }

    async fn create_item(&self, item: &NewCatalogItem) -> Result<CatalogRecord, RepositoryError> {
        self.insert_item(item).await.map_err(map_error)
    }

    async fn update_item(
        &self,
        id: &str,
        patch: &CatalogItemPatch,
    ) -> Result<CatalogRecord, RepositoryError> {
        self.patch_item(id, patch).await.map_err(map_error)
    }

    async fn delete_item(&self, id: &str) -> Result<(), RepositoryError> {
        self.remove_item(id).await.map_err(map_error)
    }
}

#[async_trait]
impl<B: HttpBackend> TimelineRepository for RestClient<B> {
    async fn list_entries(&self, item_id: &str) -> Result<Vec<TimelineEntry>, RepositoryError> {
        self.get_entries(item_id).await.map_err(map_error)
    }

    async fn create_entry(
        &self,
        entry: &NewTimelineEntry,
        position: u32,
    ) -> Result<TimelineEntry, RepositoryError> {
        self.insert_entry(entry, position).await.map_err(map_error)
    }

    async fn update_position(&self, id: &str, position: u32) -> Result<(), RepositoryError> {
        self.set_entry_position(id, position)
            .await
            .map_err(map_error)
    }

    async fn delete_entry(&self, id: &str) -> Result<(), RepositoryError> {
        self.remove_entry(id).await.map_err(map_error)
    }
}

#[async_trait]
impl<B: HttpBackend> AssetStorage for RestClient<B> {
    async fn upload_asset(
        &self,
        bytes: Vec<u8>,
        suggested_path: &str,
    ) -> Result<String, StorageError> {
        self.upload_object(bytes, suggested_path)
            .await
            .map_err(map_storage_error)
    }
}
