//! Core of the folio content catalog.
//!
//! The catalog holds the works (commissions, inventory) shown on the public
//! portfolio and edited from the admin console. Items for one category are
//! fetched through the [`CatalogRepository`] port, their heterogeneous tag
//! fields are normalized once, and the [`CatalogStore`] derives the sorted
//! tag index and the tag-filtered visible set from them.
//!
//! Storage, HTTP and rendering live in adapter crates; this crate only
//! defines the domain types, the ports they talk through, and the logic in
//! between.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod filter;
pub mod image;
pub mod ports;
pub mod services;
pub mod settings;
pub mod tags;

// Re-export commonly used types for convenience
pub use domain::{
    CatalogItem, CatalogItemPatch, CatalogRecord, Category, CategoryParseError, MoveDirection,
    NewCatalogItem, NewTimelineEntry, RawTags, TimelineEntry,
};
pub use events::CatalogEvent;
pub use filter::{FilterState, TagFilter};
pub use image::{
    DEFAULT_IMAGE_QUALITY, ImageCompletion, ImageHosts, ImagePhase, ImageRequest, ImageSlot,
    LoadToken, preload,
};
pub use ports::{
    AssetStorage, BroadcastEmitter, CatalogEventEmitter, CatalogRepository, CoreError,
    ImageFetchError, ImageFetcher, NoopEmitter, Repos, RepositoryError, StorageError,
    TimelineRepository,
};
pub use services::{
    AdminGate, AdminSession, AssetKind, CatalogAdmin, CatalogFetcher, CatalogStore, LoadOutcome,
    LoadPhase, LoadTicket,
};
pub use settings::{
    DEFAULT_ASSET_BUCKET, DEFAULT_FETCH_TIMEOUT_SECS, Settings, SettingsError, SettingsUpdate,
    validate_settings,
};
pub use tags::{clean_tag, clean_tags, compute_tag_index, normalize_tags};
