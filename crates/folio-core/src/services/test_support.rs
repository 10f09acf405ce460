//! In-memory port implementations shared by service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    CatalogItem, CatalogItemPatch, CatalogRecord, Category, NewCatalogItem, NewTimelineEntry,
    RawTags, TimelineEntry,
};
use crate::ports::{
    AssetStorage, CatalogRepository, RepositoryError, StorageError, TimelineRepository,
};

fn timestamp(offset: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + offset, 0).unwrap()
}

/// Build a raw record; higher `age_rank` means older.
pub fn record(id: &str, category: Category, tags: RawTags, age_rank: i64) -> CatalogRecord {
    CatalogRecord {
        id: id.to_string(),
        title: format!("Work {id}"),
        category,
        tags,
        image: Some(format!("https://cdn.test/{id}.jpg")),
        description: None,
        year: Some("2024".to_string()),
        created_at: timestamp(-age_rank),
    }
}

pub fn seq(tags: &[&str]) -> RawTags {
    RawTags::Sequence(tags.iter().map(ToString::to_string).collect())
}

#[derive(Default)]
pub struct MemoryCatalog {
    records: Mutex<Vec<CatalogRecord>>,
    fail: AtomicBool,
    delay: Mutex<Option<Duration>>,
    fetches: AtomicUsize,
    next_id: AtomicI64,
}

impl MemoryCatalog {
    pub fn with_records(records: Vec<CatalogRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(RepositoryError::Storage("backend unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalog {
    async fn fetch_items(&self, category: Category) -> Result<Vec<CatalogRecord>, RepositoryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check()?;
        let mut records: Vec<CatalogRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn fetch_item(&self, id: &str) -> Result<CatalogRecord, RepositoryError> {
        self.check()?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("item {id}")))
    }

    async fn create_item(&self, item: &NewCatalogItem) -> Result<CatalogRecord, RepositoryError> {
        self.check()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = CatalogRecord {
            id: format!("new-{n}"),
            title: item.title.clone(),
            category: item.category,
            tags: RawTags::Sequence(item.tags.clone()),
            image: item.image.clone(),
            description: item.description.clone(),
            year: item.year.clone(),
            created_at: timestamp(n),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_item(
        &self,
        id: &str,
        patch: &CatalogItemPatch,
    ) -> Result<CatalogRecord, RepositoryError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("item {id}")))?;
        let mut item = CatalogItem::from_record(slot.clone());
        item.apply(patch);
        *slot = item.into_record();
        Ok(slot.clone())
    }

    async fn delete_item(&self, id: &str) -> Result<(), RepositoryError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(RepositoryError::NotFound(format!("item {id}")));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTimeline {
    entries: Mutex<Vec<TimelineEntry>>,
    next_id: AtomicUsize,
}

#[async_trait]
impl TimelineRepository for MemoryTimeline {
    async fn list_entries(&self, item_id: &str) -> Result<Vec<TimelineEntry>, RepositoryError> {
        let mut entries: Vec<TimelineEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.item_id == item_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.position);
        Ok(entries)
    }

    async fn create_entry(
        &self,
        entry: &NewTimelineEntry,
        position: u32,
    ) -> Result<TimelineEntry, RepositoryError> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = TimelineEntry {
            id: format!("stage-{n}"),
            item_id: entry.item_id.clone(),
            title: entry.title.clone(),
            date: entry.date.clone(),
            description: entry.description.clone(),
            image: entry.image.clone(),
            position,
        };
        self.entries.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_position(&self, id: &str, position: u32) -> Result<(), RepositoryError> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("entry {id}")))?;
        entry.position = position;
        Ok(())
    }

    async fn delete_entry(&self, id: &str) -> Result<(), RepositoryError> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(RepositoryError::NotFound(format!("entry {id}")));
        }
        Ok(())
    }
}

/// Asset store that accepts every upload under a fixed host.
#[derive(Default)]
pub struct MemoryAssets;

#[async_trait]
impl AssetStorage for MemoryAssets {
    async fn upload_asset(
        &self,
        _bytes: Vec<u8>,
        suggested_path: &str,
    ) -> Result<String, StorageError> {
        Ok(format!("https://cdn.test/{suggested_path}"))
    }
}
