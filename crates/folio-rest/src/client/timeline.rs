//! Timeline entry requests.

use folio_core::{NewTimelineEntry, TimelineEntry};
use serde_json::json;

use super::RestClient;
use crate::endpoints::{TIMELINE_TABLE, row_url, table_url, timeline_url};
use crate::error::{RestError, RestResult};
use crate::http::{HttpBackend, RestRequest};
use crate::wire::{RemoteEntry, decode_rows};

fn first_entry(value: serde_json::Value, id: &str) -> RestResult<TimelineEntry> {
    decode_rows::<RemoteEntry>(value)?
        .into_iter()
        .next()
        .ok_or_else(|| RestError::NotFound {
            what: format!("Timeline entry {id}"),
        })?
        .into_entry()
}

impl<B: HttpBackend> RestClient<B> {
    /// Entries of one item, ascending by `order`.
    pub async fn get_entries(&self, item_id: &str) -> RestResult<Vec<TimelineEntry>> {
        let url = timeline_url(&self.base_url, item_id);
        let value = self.backend.execute(RestRequest::get(url)).await?;
        decode_rows::<RemoteEntry>(value)?
            .into_iter()
            .map(RemoteEntry::into_entry)
            .collect()
    }

    pub async fn insert_entry(
        &self,
        entry: &NewTimelineEntry,
        position: u32,
    ) -> RestResult<TimelineEntry> {
        let url = table_url(&self.base_url, TIMELINE_TABLE);
        let body = json!({
            "portfolio_id": entry.item_id,
            "title": entry.title,
            "date": entry.date,
            "description": entry.description,
            "image": entry.image,
            "order": position,
        });
        let value = self.backend.execute(RestRequest::post_json(url, body)).await?;
        first_entry(value, "(new)")
    }

    pub async fn set_entry_position(&self, id: &str, position: u32) -> RestResult<()> {
        let url = row_url(&self.base_url, TIMELINE_TABLE, id);
        let body = json!({ "order": position });
        let value = self.backend.execute(RestRequest::patch_json(url, body)).await?;
        first_entry(value, id).map(|_| ())
    }

    pub async fn remove_entry(&self, id: &str) -> RestResult<()> {
        let url = row_url(&self.base_url, TIMELINE_TABLE, id);
        let value = self.backend.execute(RestRequest::delete(url)).await?;
        first_entry(value, id).map(|_| ())
    }
}
