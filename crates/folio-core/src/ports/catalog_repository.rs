//! Catalog repository trait definition.
//!
//! This port is the data-access contract the catalog expects from its
//! environment. A hosted REST backend and a local `SQLite` file both satisfy
//! it.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{CatalogItemPatch, CatalogRecord, Category, NewCatalogItem};

/// Repository for catalog item persistence.
///
/// Records are returned raw: their tag field may be in any of the shapes
/// described by [`crate::RawTags`]. Normalization is the caller's job.
///
/// # Design Rules
///
/// - CRUD-only: fetch, create, update, delete
/// - Tag indexing and filtering belong in the core, not here
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All records in `category`, newest first by `created_at`.
    ///
    /// An empty category is an empty list, not an error.
    async fn fetch_items(&self, category: Category) -> Result<Vec<CatalogRecord>, RepositoryError>;

    /// One record by ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if it doesn't exist.
    async fn fetch_item(&self, id: &str) -> Result<CatalogRecord, RepositoryError>;

    /// Persist a new record; the store assigns `id` and `created_at`.
    async fn create_item(&self, item: &NewCatalogItem) -> Result<CatalogRecord, RepositoryError>;

    /// Apply a partial update and return the stored result.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the record doesn't exist.
    async fn update_item(
        &self,
        id: &str,
        patch: &CatalogItemPatch,
    ) -> Result<CatalogRecord, RepositoryError>;

    /// Delete a record (and anything that hangs off it, such as its timeline).
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the record doesn't exist.
    async fn delete_item(&self, id: &str) -> Result<(), RepositoryError>;
}
