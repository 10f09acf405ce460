//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from its environment.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Repository traits are CRUD-only; tag and filter logic lives in the core
//! - Every failure is a typed error, never a panic

pub mod asset_storage;
pub mod catalog_repository;
pub mod event_emitter;
pub mod image_fetcher;
pub mod timeline_repository;

use std::sync::Arc;
use thiserror::Error;

pub use asset_storage::AssetStorage;
pub use catalog_repository::CatalogRepository;
pub use event_emitter::{BroadcastEmitter, CatalogEventEmitter, NoopEmitter};
pub use image_fetcher::{ImageFetchError, ImageFetcher};
pub use timeline_repository::TimelineRepository;

/// Container for all data-access trait objects.
///
/// Adapters build one of these at the composition root; services take it
/// without knowing which backend sits behind it.
#[derive(Clone)]
pub struct Repos {
    /// Catalog item CRUD.
    pub catalog: Arc<dyn CatalogRepository>,
    /// Commission timeline entries.
    pub timeline: Arc<dyn TimelineRepository>,
    /// Uploaded image assets.
    pub assets: Arc<dyn AssetStorage>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        timeline: Arc<dyn TimelineRepository>,
        assets: Arc<dyn AssetStorage>,
    ) -> Self {
        Self {
            catalog,
            timeline,
            assets,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (sqlx,
/// HTTP status codes) and gives services one thing to match on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, network, remote service).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The backend did not answer in time.
    #[error("Timed out: {0}")]
    Timeout(String),
}

/// Errors from asset uploads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The suggested path cannot be stored.
    #[error("Invalid asset path: {0}")]
    InvalidPath(String),

    /// The upload itself failed.
    #[error("Upload failed: {0}")]
    Upload(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, HTTP
/// statuses).
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Asset upload failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Admin operation attempted without a valid password.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// True for the not-found repository case.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(RepositoryError::NotFound(_)))
    }
}
