//! Commission progress timeline.

use serde::{Deserialize, Serialize};

/// One stage in a commission's progress timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: String,
    /// Catalog item this entry belongs to.
    pub item_id: String,
    pub title: String,
    /// Free-form date label ("March 2023").
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Zero-based display position; entries are listed ascending.
    pub position: u32,
}

/// Payload for appending a timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimelineEntry {
    pub item_id: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewTimelineEntry {
    pub fn new(
        item_id: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            title: title.into(),
            date: date.into(),
            description: None,
            image: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Direction for reordering a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}
