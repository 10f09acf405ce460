//! Authenticated catalog mutations.
//!
//! Every mutating method takes an [`AdminSession`]; reads do not. Inputs are
//! normalized here (trimmed titles, cleaned tags, empty images dropped) so
//! that every backend stores the same shape.

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::admin_gate::AdminSession;
use crate::domain::{
    CatalogItem, CatalogItemPatch, MoveDirection, NewCatalogItem, NewTimelineEntry, TimelineEntry,
};
use crate::events::CatalogEvent;
use crate::ports::{CatalogEventEmitter, CoreError, Repos, RepositoryError};
use crate::tags::{clean_tag, clean_tags};

const FALLBACK_EXTENSION: &str = "bin";
const MAX_EXTENSION_LEN: usize = 8;

/// What an uploaded image belongs to; the first segment of its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Portfolio,
    Timeline,
    Tour,
}

impl AssetKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portfolio => "portfolio",
            Self::Timeline => "timeline",
            Self::Tour => "tour",
        }
    }

    /// Storage path for a new upload: `<kind>/<uuid>.<ext>`.
    ///
    /// The extension comes from `file_name`, lowercased; anything missing
    /// or odd-looking becomes `bin`.
    pub fn asset_path(self, file_name: &str) -> String {
        let ext = Path::new(file_name)
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase)
            .filter(|ext| {
                !ext.is_empty()
                    && ext.len() <= MAX_EXTENSION_LEN
                    && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
        format!("{}/{}.{ext}", self.as_str(), Uuid::new_v4().simple())
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portfolio" => Ok(Self::Portfolio),
            "timeline" => Ok(Self::Timeline),
            "tour" | "tours" => Ok(Self::Tour),
            other => Err(CoreError::Validation(format!(
                "Unknown asset kind '{other}' (expected portfolio, timeline or tour)"
            ))),
        }
    }
}

/// Admin-side catalog operations.
#[derive(Clone)]
pub struct CatalogAdmin {
    repos: Repos,
    emitter: Arc<dyn CatalogEventEmitter>,
}

impl CatalogAdmin {
    pub fn new(repos: Repos, emitter: Arc<dyn CatalogEventEmitter>) -> Self {
        Self { repos, emitter }
    }

    // ========== Items ==========

    /// Look up one item; `None` when it does not exist.
    pub async fn get(&self, id: &str) -> Result<Option<CatalogItem>, CoreError> {
        match self.repos.catalog.fetch_item(id).await {
            Ok(record) => Ok(Some(CatalogItem::from_record(record))),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up one item, failing when it does not exist.
    pub async fn find(&self, id: &str) -> Result<CatalogItem, CoreError> {
        let record = self.repos.catalog.fetch_item(id).await?;
        Ok(CatalogItem::from_record(record))
    }

    pub async fn create(
        &self,
        _session: &AdminSession,
        item: NewCatalogItem,
    ) -> Result<CatalogItem, CoreError> {
        let item = item.normalized();
        require_title(&item.title)?;

        let created = CatalogItem::from_record(self.repos.catalog.create_item(&item).await?);
        info!(id = %created.id, category = %created.category, "Created catalog item");
        self.emitter.emit(CatalogEvent::ItemCreated {
            id: created.id.clone(),
            category: created.category,
        });
        Ok(created)
    }

    /// Apply a partial update. An empty patch returns the item unchanged.
    pub async fn update(
        &self,
        _session: &AdminSession,
        id: &str,
        patch: CatalogItemPatch,
    ) -> Result<CatalogItem, CoreError> {
        let patch = normalize_patch(patch)?;
        if patch.is_empty() {
            debug!(id, "Empty patch, nothing to update");
            return self.find(id).await;
        }

        let previous_category = self.repos.catalog.fetch_item(id).await?.category;
        let updated = CatalogItem::from_record(self.repos.catalog.update_item(id, &patch).await?);
        info!(id, category = %updated.category, %previous_category, "Updated catalog item");
        self.emitter.emit(CatalogEvent::ItemUpdated {
            id: updated.id.clone(),
            category: updated.category,
            previous_category,
        });
        Ok(updated)
    }

    pub async fn delete(&self, _session: &AdminSession, id: &str) -> Result<(), CoreError> {
        self.repos.catalog.delete_item(id).await?;
        info!(id, "Deleted catalog item");
        self.emitter.emit(CatalogEvent::item_deleted(id));
        Ok(())
    }

    /// Add `tag` to an item. Adding a tag it already has is a no-op.
    pub async fn add_tag(
        &self,
        session: &AdminSession,
        id: &str,
        tag: &str,
    ) -> Result<CatalogItem, CoreError> {
        let tag = clean_tag(tag)
            .ok_or_else(|| CoreError::Validation("Tag cannot be empty".to_string()))?;
        let item = self.find(id).await?;
        if item.has_tag(&tag) {
            return Ok(item);
        }

        let mut tags = item.tags;
        tags.push(tag);
        self.update(session, id, CatalogItemPatch::tags(tags)).await
    }

    /// Remove `tag` from an item. Removing a tag it lacks is a no-op.
    pub async fn remove_tag(
        &self,
        session: &AdminSession,
        id: &str,
        tag: &str,
    ) -> Result<CatalogItem, CoreError> {
        let tag = tag.trim();
        let item = self.find(id).await?;
        if !item.has_tag(tag) {
            return Ok(item);
        }

        let tags = item.tags.into_iter().filter(|t| t != tag).collect();
        self.update(session, id, CatalogItemPatch::tags(tags)).await
    }

    // ========== Assets ==========

    /// Store image bytes and return their public URL.
    pub async fn upload_image(
        &self,
        _session: &AdminSession,
        bytes: Vec<u8>,
        file_name: &str,
        kind: AssetKind,
    ) -> Result<String, CoreError> {
        if bytes.is_empty() {
            return Err(CoreError::Validation("Upload is empty".to_string()));
        }

        let path = kind.asset_path(file_name);
        let size = bytes.len();
        let url = self.repos.assets.upload_asset(bytes, &path).await?;
        info!(%path, size, "Uploaded image");
        Ok(url)
    }

    // ========== Timeline ==========

    /// Timeline entries of a commission, in display order.
    pub async fn timeline(&self, item_id: &str) -> Result<Vec<TimelineEntry>, CoreError> {
        Ok(self.repos.timeline.list_entries(item_id).await?)
    }

    /// Append an entry after the last one in the item's timeline.
    pub async fn add_timeline_entry(
        &self,
        _session: &AdminSession,
        mut entry: NewTimelineEntry,
    ) -> Result<TimelineEntry, CoreError> {
        entry.title = entry.title.trim().to_string();
        entry.date = entry.date.trim().to_string();
        require_title(&entry.title)?;
        if entry.date.is_empty() {
            return Err(CoreError::Validation("Date cannot be empty".to_string()));
        }
        // the owning item must exist
        self.find(&entry.item_id).await?;

        let existing = self.repos.timeline.list_entries(&entry.item_id).await?;
        let position = match existing.last() {
            None => 0,
            Some(last) => last
                .position
                .checked_add(1)
                .ok_or_else(|| CoreError::Internal("timeline position overflow".to_string()))?,
        };
        let created = self.repos.timeline.create_entry(&entry, position).await?;
        info!(id = %created.id, item_id = %created.item_id, position, "Added timeline entry");
        Ok(created)
    }

    pub async fn remove_timeline_entry(
        &self,
        _session: &AdminSession,
        entry_id: &str,
    ) -> Result<(), CoreError> {
        self.repos.timeline.delete_entry(entry_id).await?;
        info!(id = entry_id, "Removed timeline entry");
        Ok(())
    }

    /// Swap an entry with its neighbour. Moving past either end is a no-op.
    ///
    /// Positions are rewritten as `0..n` afterwards, so gaps left by removals
    /// disappear.
    pub async fn move_timeline_entry(
        &self,
        _session: &AdminSession,
        item_id: &str,
        entry_id: &str,
        direction: MoveDirection,
    ) -> Result<Vec<TimelineEntry>, CoreError> {
        let mut entries = self.repos.timeline.list_entries(item_id).await?;
        let index = entries
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("timeline entry {entry_id}")))?;

        let neighbour = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|&i| i < entries.len()),
        };
        let Some(neighbour) = neighbour else {
            debug!(id = entry_id, ?direction, "Timeline entry already at the edge");
            return Ok(entries);
        };
        entries.swap(index, neighbour);

        for (slot, entry) in (0u32..).zip(entries.iter_mut()) {
            if entry.position != slot {
                self.repos.timeline.update_position(&entry.id, slot).await?;
                entry.position = slot;
            }
        }
        info!(id = entry_id, ?direction, "Moved timeline entry");
        Ok(entries)
    }
}

fn require_title(title: &str) -> Result<(), CoreError> {
    if title.is_empty() {
        return Err(CoreError::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}

fn normalize_patch(mut patch: CatalogItemPatch) -> Result<CatalogItemPatch, CoreError> {
    if let Some(title) = patch.title.take() {
        let title = title.trim().to_string();
        require_title(&title)?;
        patch.title = Some(title);
    }
    patch.tags = patch.tags.map(clean_tags);
    if let Some(Some(image)) = &patch.image {
        if image.trim().is_empty() {
            patch.image = Some(None);
        }
    }
    Ok(patch)
}
