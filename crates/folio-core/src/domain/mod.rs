//! Domain types for the catalog.
//!
//! These are pure data types with no infrastructure dependencies.

mod item;
mod timeline;

pub use item::{
    CatalogItem, CatalogItemPatch, CatalogRecord, Category, CategoryParseError, NewCatalogItem,
    RawTags,
};
pub use timeline::{MoveDirection, NewTimelineEntry, TimelineEntry};
