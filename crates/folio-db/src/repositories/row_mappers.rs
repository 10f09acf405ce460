//! Row mapping helpers for `SQLite` queries.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use folio_core::{CatalogRecord, Category, RawTags, RepositoryError, TimelineEntry};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Shared SELECT column list for catalog item queries.
pub const ITEM_SELECT_COLUMNS: &str =
    "id, title, category, tags, image, description, year, created_at";

/// Shared SELECT column list for timeline queries.
pub const TIMELINE_SELECT_COLUMNS: &str =
    "id, portfolio_id, title, date, description, image, position";

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp; also accepts `YYYY-MM-DD HH:MM:SS[.f][ UTC]`.
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            let trimmed = text.trim_end_matches(" UTC");
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
                .map(|dt| dt.and_utc())
                .ok()
        })
}

/// Map a driver error onto the port error, keeping constraint failures
/// distinguishable.
pub fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::AlreadyExists(db.message().to_string())
        }
        sqlx::Error::Database(db) if db.is_foreign_key_violation() || db.is_check_violation() => {
            RepositoryError::Constraint(db.message().to_string())
        }
        sqlx::Error::PoolTimedOut => RepositoryError::Timeout(e.to_string()),
        _ => RepositoryError::Storage(e.to_string()),
    }
}

/// Parse a database row into a raw catalog record.
///
/// The tag column is handed over untouched; a NULL becomes
/// [`RawTags::Absent`], anything else [`RawTags::Serialized`].
pub fn row_to_record(row: &SqliteRow) -> Result<CatalogRecord, RepositoryError> {
    let category: String = row.try_get("category").map_err(map_sqlx_error)?;
    let category = category
        .parse::<Category>()
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    let created_at: String = row.try_get("created_at").map_err(map_sqlx_error)?;
    let created_at = parse_datetime(&created_at).ok_or_else(|| {
        RepositoryError::Serialization(format!("Invalid created_at '{created_at}'"))
    })?;

    Ok(CatalogRecord {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        title: row.try_get("title").map_err(map_sqlx_error)?,
        category,
        tags: RawTags::from_column(row.try_get("tags").map_err(map_sqlx_error)?),
        image: row.try_get("image").map_err(map_sqlx_error)?,
        description: row.try_get("description").map_err(map_sqlx_error)?,
        year: row.try_get("year").map_err(map_sqlx_error)?,
        created_at,
    })
}

/// Parse a database row into a timeline entry.
pub fn row_to_entry(row: &SqliteRow) -> Result<TimelineEntry, RepositoryError> {
    let position: i64 = row.try_get("position").map_err(map_sqlx_error)?;
    let position = u32::try_from(position)
        .map_err(|_| RepositoryError::Serialization(format!("Invalid position {position}")))?;

    Ok(TimelineEntry {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        item_id: row.try_get("portfolio_id").map_err(map_sqlx_error)?,
        title: row.try_get("title").map_err(map_sqlx_error)?,
        date: row.try_get("date").map_err(map_sqlx_error)?,
        description: row.try_get("description").map_err(map_sqlx_error)?,
        image: row.try_get("image").map_err(map_sqlx_error)?,
        position,
    })
}
