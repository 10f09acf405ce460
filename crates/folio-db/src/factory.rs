//! Composition utilities for wiring the core to `SQLite` backends.
//!
//! This module is focused purely on construction and should not contain
//! any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use folio_core::Repos;

use crate::repositories::{SqliteAssetStore, SqliteCatalogRepository, SqliteTimelineRepository};

/// Default URL prefix for locally stored assets.
pub const DEFAULT_PUBLIC_ASSET_BASE: &str = "/assets";

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// Returns a `Repos` struct from `folio-core` containing
    /// trait-object-wrapped repositories.
    pub fn build_repos(pool: SqlitePool, public_asset_base: Option<&str>) -> Repos {
        Repos::new(
            Arc::new(SqliteCatalogRepository::new(pool.clone())),
            Arc::new(SqliteTimelineRepository::new(pool.clone())),
            Arc::new(SqliteAssetStore::new(
                pool,
                public_asset_base.unwrap_or(DEFAULT_PUBLIC_ASSET_BASE),
            )),
        )
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All repositories over this database.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone(), None)
    }

    /// Create a catalog repository using this test database.
    pub fn catalog_repository(&self) -> SqliteCatalogRepository {
        SqliteCatalogRepository::new(self.pool.clone())
    }
}
