//! Timeline repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewTimelineEntry, TimelineEntry};

/// Repository for commission timeline entries.
#[async_trait]
pub trait TimelineRepository: Send + Sync {
    /// Entries for one item, ascending by position.
    async fn list_entries(&self, item_id: &str) -> Result<Vec<TimelineEntry>, RepositoryError>;

    /// Persist a new entry at `position`.
    async fn create_entry(
        &self,
        entry: &NewTimelineEntry,
        position: u32,
    ) -> Result<TimelineEntry, RepositoryError>;

    /// Move an entry to `position`.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the entry doesn't exist.
    async fn update_position(&self, id: &str, position: u32) -> Result<(), RepositoryError>;

    /// Delete an entry.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the entry doesn't exist.
    async fn delete_entry(&self, id: &str) -> Result<(), RepositoryError>;
}
