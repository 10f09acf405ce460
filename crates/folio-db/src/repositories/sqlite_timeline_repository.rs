//! `SQLite` implementation of the `TimelineRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use folio_core::{NewTimelineEntry, RepositoryError, TimelineEntry, TimelineRepository};

use super::row_mappers::{TIMELINE_SELECT_COLUMNS, map_sqlx_error, row_to_entry};

/// `SQLite` implementation of the `TimelineRepository` trait.
///
/// Entries are removed together with their catalog item.
pub struct SqliteTimelineRepository {
    pool: SqlitePool,
}

impl SqliteTimelineRepository {
    /// Create a new `SQLite` timeline repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimelineRepository for SqliteTimelineRepository {
    async fn list_entries(&self, item_id: &str) -> Result<Vec<TimelineEntry>, RepositoryError> {
        let query = format!(
            "SELECT {TIMELINE_SELECT_COLUMNS} FROM portfolio_timeline WHERE portfolio_id = ? ORDER BY position ASC, rowid ASC"
        );

        let rows = sqlx::query(&query)
            .bind(item_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_entry).collect()
    }

    async fn create_entry(
        &self,
        entry: &NewTimelineEntry,
        position: u32,
    ) -> Result<TimelineEntry, RepositoryError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r"INSERT INTO portfolio_timeline (
                id, portfolio_id, title, date, description, image, position
            ) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&entry.item_id)
        .bind(&entry.title)
        .bind(&entry.date)
        .bind(&entry.description)
        .bind(&entry.image)
        .bind(i64::from(position))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(TimelineEntry {
            id,
            item_id: entry.item_id.clone(),
            title: entry.title.clone(),
            date: entry.date.clone(),
            description: entry.description.clone(),
            image: entry.image.clone(),
            position,
        })
    }

    async fn update_position(&self, id: &str, position: u32) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE portfolio_timeline SET position = ? WHERE id = ?")
            .bind(i64::from(position))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Timeline entry with ID {id}")));
        }

        Ok(())
    }

    async fn delete_entry(&self, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portfolio_timeline WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Timeline entry with ID {id}")));
        }

        Ok(())
    }
}
