//! Row shapes as the backend returns them.
//!
//! Hosted tables are loosely typed: ids may be numbers, `year` may be a
//! number, and `tags` may be a real array, JSON text or null. Everything is
//! converted to the core types here.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use folio_core::{CatalogRecord, Category, RawTags, TimelineEntry};

use crate::error::{RestError, RestResult};

/// Render a scalar JSON value as text; `None` for null.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn required_id(value: Value, field: &str) -> RestResult<String> {
    scalar_to_string(value).ok_or_else(|| RestError::InvalidResponse {
        message: format!("row without {field}"),
    })
}

/// A `portfolio` row.
#[derive(Debug, Deserialize)]
pub struct RemoteItem {
    id: Value,
    title: String,
    category: Category,
    #[serde(default)]
    tags: RawTags,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    year: Value,
    created_at: DateTime<Utc>,
}

impl RemoteItem {
    pub fn into_record(self) -> RestResult<CatalogRecord> {
        Ok(CatalogRecord {
            id: required_id(self.id, "id")?,
            title: self.title,
            category: self.category,
            tags: self.tags,
            image: self.image,
            description: self.description,
            year: scalar_to_string(self.year),
            created_at: self.created_at,
        })
    }
}

/// A `portfolio_timeline` row.
#[derive(Debug, Deserialize)]
pub struct RemoteEntry {
    id: Value,
    portfolio_id: Value,
    title: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    order: Option<i64>,
}

impl RemoteEntry {
    pub fn into_entry(self) -> RestResult<TimelineEntry> {
        let position = self
            .order
            .map_or(0, |order| u32::try_from(order.max(0)).unwrap_or(u32::MAX));
        Ok(TimelineEntry {
            id: required_id(self.id, "id")?,
            item_id: required_id(self.portfolio_id, "portfolio_id")?,
            title: self.title,
            date: self.date.unwrap_or_default(),
            description: self.description,
            image: self.image,
            position,
        })
    }
}

/// Decode a row array; an empty body is an empty list.
pub fn decode_rows<T: DeserializeOwned>(value: Value) -> RestResult<Vec<T>> {
    match value {
        Value::Null => Ok(Vec::new()),
        other => Ok(serde_json::from_value(other)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_with_numeric_id_and_array_tags() {
        let rows: Vec<RemoteItem> = decode_rows(json!([{
            "id": 12,
            "title": "Harbour",
            "category": "commission",
            "tags": ["Mural", "Night"],
            "image": "https://abc.supabase.co/storage/v1/object/public/mark_images/portfolio/a.jpg",
            "year": 2023,
            "created_at": "2024-02-01T10:00:00.123456+00:00"
        }]))
        .unwrap();

        let record = rows.into_iter().next().unwrap().into_record().unwrap();
        assert_eq!(record.id, "12");
        assert_eq!(record.year.as_deref(), Some("2023"));
        assert_eq!(record.tags, RawTags::Sequence(vec!["Mural".into(), "Night".into()]));
        assert_eq!(record.description, None);
    }

    #[test]
    fn test_item_with_string_and_null_tags() {
        let rows: Vec<RemoteItem> = decode_rows(json!([
            {
                "id": "a",
                "title": "A",
                "category": "inventory",
                "tags": "[\"Urban\"]",
                "created_at": "2024-02-01T10:00:00Z"
            },
            {
                "id": "b",
                "title": "B",
                "category": "inventory",
                "tags": null,
                "year": null,
                "created_at": "2024-02-01T10:00:00Z"
            }
        ]))
        .unwrap();
        let records: Vec<CatalogRecord> = rows
            .into_iter()
            .map(|r| r.into_record().unwrap())
            .collect();

        assert_eq!(records[0].tags, RawTags::Serialized("[\"Urban\"]".into()));
        assert_eq!(records[1].tags, RawTags::Absent);
        assert_eq!(records[1].year, None);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result: RestResult<Vec<RemoteItem>> = decode_rows(json!([{
            "id": "a",
            "title": "A",
            "category": "tours",
            "created_at": "2024-02-01T10:00:00Z"
        }]));
        assert!(matches!(result, Err(RestError::JsonParse(_))));
    }

    #[test]
    fn test_entry_conversion() {
        let rows: Vec<RemoteEntry> = decode_rows(json!([{
            "id": 3,
            "portfolio_id": 12,
            "title": "Sketch",
            "date": "March 2023",
            "description": "",
            "image": null,
            "order": 2
        }]))
        .unwrap();
        let entry = rows.into_iter().next().unwrap().into_entry().unwrap();
        assert_eq!(entry.id, "3");
        assert_eq!(entry.item_id, "12");
        assert_eq!(entry.position, 2);
        assert_eq!(entry.image, None);
    }

    #[test]
    fn test_null_id_is_invalid() {
        let rows: Vec<RemoteEntry> = decode_rows(json!([{
            "id": null,
            "portfolio_id": 1,
            "title": "x"
        }]))
        .unwrap();
        let err = rows.into_iter().next().unwrap().into_entry().unwrap_err();
        assert!(matches!(err, RestError::InvalidResponse { .. }));
    }

    #[test]
    fn test_empty_body_is_empty_list() {
        let rows: Vec<RemoteEntry> = decode_rows(Value::Null).unwrap();
        assert!(rows.is_empty());
    }
}
