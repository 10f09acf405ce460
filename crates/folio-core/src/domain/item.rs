//! Catalog item domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::tags::{clean_tags, normalize_tags};

/// Closed set of catalog partitions.
///
/// Each category is fetched as its own view; items are never filtered
/// client-side by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Commissioned works, each with an optional progress timeline.
    Commission,
    /// Available inventory.
    Inventory,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 2] = [Self::Commission, Self::Inventory];

    /// Wire/storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Commission => "commission",
            Self::Inventory => "inventory",
        }
    }

    /// Title-cased label for display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Commission => "Commission",
            Self::Inventory => "Inventory",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category '{0}' (expected 'commission' or 'inventory')")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commission" | "commissions" => Ok(Self::Commission),
            "inventory" => Ok(Self::Inventory),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

/// Tag field exactly as delivered by the external store.
///
/// Stores hand tags back as a real list, as a JSON-encoded string, or not at
/// all. The shape is resolved once by [`normalize_tags`] and never looked at
/// again downstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawTags {
    /// A proper list of strings.
    Sequence(Vec<String>),
    /// A string that should contain a JSON array of strings.
    Serialized(String),
    /// Missing or null.
    #[default]
    Absent,
}

impl RawTags {
    /// Classify an arbitrary JSON value.
    ///
    /// Arrays holding anything other than strings, and scalars other than
    /// strings, are kept as their JSON text so that decoding (and failing)
    /// happens in one place.
    pub fn from_json_value(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::String(s)) => Self::Serialized(s),
            Some(Value::Array(values)) => {
                if values.iter().all(Value::is_string) {
                    Self::Sequence(
                        values
                            .into_iter()
                            .filter_map(|v| match v {
                                Value::String(s) => Some(s),
                                _ => None,
                            })
                            .collect(),
                    )
                } else {
                    Self::Serialized(Value::Array(values).to_string())
                }
            }
            Some(other) => Self::Serialized(other.to_string()),
        }
    }

    /// Classify a nullable text column.
    pub fn from_column(text: Option<String>) -> Self {
        text.map_or(Self::Absent, Self::Serialized)
    }
}

impl Serialize for RawTags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Sequence(tags) => tags.serialize(serializer),
            Self::Serialized(text) => serializer.serialize_str(text),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for RawTags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(Self::from_json_value(value))
    }
}

/// Raw record as returned by the data-access contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Opaque identifier assigned by the store.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Partition this record belongs to.
    pub category: Category,
    /// Tags in whichever shape the store produced.
    #[serde(default)]
    pub tags: RawTags,
    /// Remote image reference.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    /// Creation time, used only for default ordering.
    pub created_at: DateTime<Utc>,
}

/// A normalized, displayable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub category: Category,
    /// Normalized tags, in the order the store delivered them.
    pub tags: Vec<String>,
    /// Image URL; never `Some("")`.
    pub image: Option<String>,
    pub description: Option<String>,
    pub year: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Build an item from a raw record, normalizing its tag field.
    pub fn from_record(record: CatalogRecord) -> Self {
        let tags = normalize_tags(&record.tags);
        Self {
            id: record.id,
            title: record.title,
            category: record.category,
            tags,
            image: non_empty(record.image),
            description: record.description,
            year: record.year,
            created_at: record.created_at,
        }
    }

    /// Image URL, if the item has a usable one.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Whether the item carries `tag` (exact, case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: &CatalogItemPatch) {
        if let Some(ref title) = patch.title {
            title.trim().clone_into(&mut self.title);
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(ref tags) = patch.tags {
            self.tags = clean_tags(tags.iter().cloned());
        }
        if let Some(ref image) = patch.image {
            self.image = non_empty(image.clone());
        }
        if let Some(ref description) = patch.description {
            self.description.clone_from(description);
        }
        if let Some(ref year) = patch.year {
            self.year.clone_from(year);
        }
    }

    /// Convert back into a record with a sequence-shaped tag field.
    pub fn into_record(self) -> CatalogRecord {
        CatalogRecord {
            id: self.id,
            title: self.title,
            category: self.category,
            tags: RawTags::Sequence(self.tags),
            image: self.image,
            description: self.description,
            year: self.year,
            created_at: self.created_at,
        }
    }
}

impl From<CatalogRecord> for CatalogItem {
    fn from(record: CatalogRecord) -> Self {
        Self::from_record(record)
    }
}

/// Payload for creating a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCatalogItem {
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

impl NewCatalogItem {
    /// Start a new item with only the required fields.
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            category,
            tags: Vec::new(),
            image: None,
            description: None,
            year: None,
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Trim the title, clean tags and drop an empty image.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            category: self.category,
            tags: clean_tags(self.tags),
            image: non_empty(self.image),
            description: self.description,
            year: self.year,
        }
    }
}

/// Partial update for a catalog item.
///
/// `None` leaves a field unchanged. For the nullable fields,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Option<String>>,
}

impl CatalogItemPatch {
    /// Patch that only replaces the tag list.
    pub const fn tags(tags: Vec<String>) -> Self {
        Self {
            title: None,
            category: None,
            tags: Some(tags),
            image: None,
            description: None,
            year: None,
        }
    }

    /// True when applying the patch would change nothing.
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.image.is_none()
            && self.description.is_none()
            && self.year.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
