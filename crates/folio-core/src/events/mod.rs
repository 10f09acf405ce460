//! Change notifications emitted by the catalog.
//!
//! Renderers subscribe to these instead of polling store state.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "loaded", "category": "inventory", "count": 3, "tags": ["Landscape", "Urban"] }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::Category;

/// Catalog change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEvent {
    // ========== Load Events ==========
    /// A category view started loading; its previous items were discarded.
    LoadStarted {
        /// Category being loaded.
        category: Category,
    },

    /// A category view finished loading.
    Loaded {
        /// Category that was loaded.
        category: Category,
        /// Number of items loaded.
        count: usize,
        /// Recomputed tag index.
        tags: Vec<String>,
    },

    /// A category view failed to load.
    LoadFailed {
        /// Category that failed.
        category: Category,
        /// Error description.
        error: String,
    },

    // ========== Filter Events ==========
    /// The tag selection changed.
    FilterChanged {
        /// Selected tags, ascending.
        selected: Vec<String>,
        /// Number of visible items after the change.
        visible: usize,
    },

    // ========== Admin Events ==========
    /// An item was created.
    ItemCreated {
        /// ID of the new item.
        id: String,
        /// Its category.
        category: Category,
    },

    /// An item was updated.
    ItemUpdated {
        /// ID of the updated item.
        id: String,
        /// Its category after the update.
        category: Category,
        /// Its category before the update.
        previous_category: Category,
    },

    /// An item was deleted.
    ItemDeleted {
        /// ID of the deleted item.
        id: String,
    },
}

impl CatalogEvent {
    pub const fn load_started(category: Category) -> Self {
        Self::LoadStarted { category }
    }

    pub fn load_failed(category: Category, error: impl Into<String>) -> Self {
        Self::LoadFailed {
            category,
            error: error.into(),
        }
    }

    pub fn item_deleted(id: impl Into<String>) -> Self {
        Self::ItemDeleted { id: id.into() }
    }

    /// Whether this event means the cached catalog for `category` is stale.
    pub fn invalidates(&self, category: Category) -> bool {
        match self {
            Self::ItemCreated { category: c, .. } => *c == category,
            Self::ItemUpdated {
                category: c,
                previous_category: prev,
                ..
            } => *c == category || *prev == category,
            // the deleted item's category is unknown here
            Self::ItemDeleted { .. } => true,
            _ => false,
        }
    }
}
