//! `SQLite` implementation of the `CatalogRepository` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use folio_core::{
    CatalogItem, CatalogItemPatch, CatalogRecord, CatalogRepository, Category, NewCatalogItem,
    RepositoryError,
};

use super::row_mappers::{ITEM_SELECT_COLUMNS, format_datetime, map_sqlx_error, row_to_record};

/// `SQLite` implementation of the `CatalogRepository` trait.
///
/// Items live in the `portfolio` table; tags are written as a JSON array.
pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

impl SqliteCatalogRepository {
    /// Create a new `SQLite` catalog repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn tags_to_json(tags: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(tags).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn fetch_items(&self, category: Category) -> Result<Vec<CatalogRecord>, RepositoryError> {
        let query = format!(
            "SELECT {ITEM_SELECT_COLUMNS} FROM portfolio WHERE category = ? ORDER BY created_at DESC, rowid DESC"
        );

        let rows = sqlx::query(&query)
            .bind(category.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(%category, count = rows.len(), "Fetched catalog rows");
        rows.iter().map(row_to_record).collect()
    }

    async fn fetch_item(&self, id: &str) -> Result<CatalogRecord, RepositoryError> {
        let query = format!("SELECT {ITEM_SELECT_COLUMNS} FROM portfolio WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("Catalog item with ID {id}")))?;

        row_to_record(&row)
    }

    async fn create_item(&self, item: &NewCatalogItem) -> Result<CatalogRecord, RepositoryError> {
        let id = Uuid::new_v4().to_string();
        let tags_json = tags_to_json(&item.tags)?;

        sqlx::query(
            r"INSERT INTO portfolio (
                id, title, category, tags, image, description, year, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&item.title)
        .bind(item.category.as_str())
        .bind(&tags_json)
        .bind(&item.image)
        .bind(&item.description)
        .bind(&item.year)
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.fetch_item(&id).await
    }

    async fn update_item(
        &self,
        id: &str,
        patch: &CatalogItemPatch,
    ) -> Result<CatalogRecord, RepositoryError> {
        let mut item = CatalogItem::from_record(self.fetch_item(id).await?);
        item.apply(patch);

        // Untouched tag columns keep their stored shape
        let tags_json = patch
            .tags
            .as_ref()
            .map(|_| tags_to_json(&item.tags))
            .transpose()?;

        let result = sqlx::query(
            "UPDATE portfolio SET title = ?, category = ?, tags = COALESCE(?, tags), image = ?, description = ?, year = ? WHERE id = ?",
        )
        .bind(&item.title)
        .bind(item.category.as_str())
        .bind(&tags_json)
        .bind(&item.image)
        .bind(&item.description)
        .bind(&item.year)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Catalog item with ID {id}")));
        }

        self.fetch_item(id).await
    }

    async fn delete_item(&self, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portfolio WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Catalog item with ID {id}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use folio_core::{RawTags, normalize_tags};

    async fn repo() -> SqliteCatalogRepository {
        SqliteCatalogRepository::new(setup_test_database().await.unwrap())
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let repo = repo().await;
        let item = NewCatalogItem::new("Harbour", Category::Commission)
            .with_tags(["Mural", "Night"])
            .with_year("2023");

        let created = repo.create_item(&item).await.unwrap();
        assert_eq!(created.title, "Harbour");
        assert_eq!(created.tags, RawTags::Serialized(r#"["Mural","Night"]"#.into()));
        assert_eq!(normalize_tags(&created.tags), ["Mural", "Night"]);

        let fetched = repo.fetch_item(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_fetch_items_filters_and_orders() {
        let repo = repo().await;
        let first = repo
            .create_item(&NewCatalogItem::new("Older", Category::Inventory))
            .await
            .unwrap();
        let second = repo
            .create_item(&NewCatalogItem::new("Newer", Category::Inventory))
            .await
            .unwrap();
        repo.create_item(&NewCatalogItem::new("Elsewhere", Category::Commission))
            .await
            .unwrap();

        let items = repo.fetch_items(Category::Inventory).await.unwrap();
        let ids: Vec<_> = items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, [second.id.as_str(), first.id.as_str()]);
    }

    #[tokio::test]
    async fn test_null_tags_are_absent() {
        let pool = setup_test_database().await.unwrap();
        sqlx::query(
            "INSERT INTO portfolio (id, title, category, tags, created_at) VALUES ('n', 'Bare', 'inventory', NULL, '2024-01-01T00:00:00.000000Z')",
        )
        .execute(&pool)
        .await
        .unwrap();
        let repo = SqliteCatalogRepository::new(pool);

        let record = repo.fetch_item("n").await.unwrap();
        assert_eq!(record.tags, RawTags::Absent);
    }

    #[tokio::test]
    async fn test_update_keeps_untouched_tags() {
        let pool = setup_test_database().await.unwrap();
        sqlx::query(
            "INSERT INTO portfolio (id, title, category, tags, created_at) VALUES ('m', 'Old', 'inventory', 'not json', '2024-01-01T00:00:00.000000Z')",
        )
        .execute(&pool)
        .await
        .unwrap();
        let repo = SqliteCatalogRepository::new(pool);

        let patch = CatalogItemPatch {
            title: Some("New".into()),
            ..CatalogItemPatch::default()
        };
        let updated = repo.update_item("m", &patch).await.unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.tags, RawTags::Serialized("not json".into()));

        let updated = repo
            .update_item("m", &CatalogItemPatch::tags(vec!["Fixed".into()]))
            .await
            .unwrap();
        assert_eq!(normalize_tags(&updated.tags), ["Fixed"]);
    }

    #[tokio::test]
    async fn test_update_clears_nullable_fields() {
        let repo = repo().await;
        let created = repo
            .create_item(
                &NewCatalogItem::new("Piece", Category::Inventory)
                    .with_image("https://x.supabase.co/a.jpg")
                    .with_description("Oil on canvas"),
            )
            .await
            .unwrap();

        let patch = CatalogItemPatch {
            image: Some(None),
            category: Some(Category::Commission),
            ..CatalogItemPatch::default()
        };
        let updated = repo.update_item(&created.id, &patch).await.unwrap();
        assert_eq!(updated.image, None);
        assert_eq!(updated.description.as_deref(), Some("Oil on canvas"));
        assert_eq!(updated.category, Category::Commission);
    }

    #[tokio::test]
    async fn test_missing_item_errors() {
        let repo = repo().await;
        assert!(matches!(
            repo.fetch_item("missing").await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.update_item("missing", &CatalogItemPatch::default()).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete_item("missing").await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let created = repo
            .create_item(&NewCatalogItem::new("Gone", Category::Inventory))
            .await
            .unwrap();
        repo.delete_item(&created.id).await.unwrap();
        assert!(repo.fetch_items(Category::Inventory).await.unwrap().is_empty());
    }
}
