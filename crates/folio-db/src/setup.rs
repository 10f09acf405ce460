//! Database setup and initialization.
//!
//! Entry points call [`setup_database`] with the resolved database path.

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;
use tracing::debug;

/// Opens the `SQLite` database file and ensures the schema exists.
///
/// The file and its parent directory are created when missing.
///
/// # Example
///
/// ```rust,no_run
/// use folio_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("folio.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true),
    )
    .await?;

    create_schema(&pool).await?;
    debug!(path = %db_path.display(), "Database ready");

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// The pool is capped at one connection; every `:memory:` connection would
/// otherwise see its own empty database.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    use sqlx::sqlite::SqlitePoolOptions;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .in_memory(true)
                .foreign_keys(true),
        )
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// Safe to call multiple times as all statements use IF NOT EXISTS.
pub(crate) async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // Catalog items; tags hold a JSON array as text, or NULL
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS portfolio (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            category TEXT NOT NULL CHECK (category IN ('commission', 'inventory')),
            tags TEXT,
            image TEXT,
            description TEXT,
            year TEXT,
            created_at TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_portfolio_category ON portfolio(category, created_at)",
    )
    .execute(pool)
    .await?;

    // Commission progress timeline
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS portfolio_timeline (
            id TEXT PRIMARY KEY NOT NULL,
            portfolio_id TEXT NOT NULL,
            title TEXT NOT NULL,
            date TEXT NOT NULL,
            description TEXT,
            image TEXT,
            position INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (portfolio_id) REFERENCES portfolio(id) ON DELETE CASCADE
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_timeline_item ON portfolio_timeline(portfolio_id, position)",
    )
    .execute(pool)
    .await?;

    // Uploaded image bytes, keyed by storage path
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS assets (
            path TEXT PRIMARY KEY NOT NULL,
            bytes BLOB NOT NULL,
            uploaded_at TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_database() {
        let pool = setup_test_database().await.unwrap();

        for table in ["portfolio", "portfolio_timeline", "assets"] {
            let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&pool)
                .await
                .unwrap();
            assert_eq!(count, 0);
        }
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let pool = setup_test_database().await.unwrap();
        create_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_setup_database_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("folio.db");

        let pool = setup_database(&path).await.unwrap();
        pool.close().await;
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_category_check_constraint() {
        let pool = setup_test_database().await.unwrap();
        let result = sqlx::query(
            "INSERT INTO portfolio (id, title, category, created_at) VALUES ('x', 't', 'tours', 'now')",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }
}
