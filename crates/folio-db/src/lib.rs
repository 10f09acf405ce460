//! `SQLite` backend for the folio catalog.
//!
//! Implements the catalog, timeline and asset ports from `folio-core` on top
//! of a single `SQLite` file. Tags are stored as JSON text, so records come
//! back in the serialized shape and are normalized by the core like any
//! other backend's.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

// Re-export repository implementations
pub use repositories::{SqliteAssetStore, SqliteCatalogRepository, SqliteTimelineRepository};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
