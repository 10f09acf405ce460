//! Catalog item requests.

use folio_core::{CatalogItemPatch, CatalogRecord, Category, NewCatalogItem};
use tracing::debug;

use super::RestClient;
use crate::endpoints::{ITEMS_TABLE, items_url, row_url, table_url};
use crate::error::{RestError, RestResult};
use crate::http::{HttpBackend, RestRequest};
use crate::wire::{RemoteItem, decode_rows};

fn first_item(value: serde_json::Value, id: &str) -> RestResult<CatalogRecord> {
    decode_rows::<RemoteItem>(value)?
        .into_iter()
        .next()
        .ok_or_else(|| RestError::NotFound {
            what: format!("Catalog item {id}"),
        })?
        .into_record()
}

impl<B: HttpBackend> RestClient<B> {
    /// All items of a category, newest first.
    pub async fn list_items(&self, category: Category) -> RestResult<Vec<CatalogRecord>> {
        let url = items_url(&self.base_url, category);
        let value = self.backend.execute(RestRequest::get(url)).await?;
        let records = decode_rows::<RemoteItem>(value)?
            .into_iter()
            .map(RemoteItem::into_record)
            .collect::<RestResult<Vec<_>>>()?;
        debug!(%category, count = records.len(), "Fetched catalog rows");
        Ok(records)
    }

    pub async fn get_item(&self, id: &str) -> RestResult<CatalogRecord> {
        let url = row_url(&self.base_url, ITEMS_TABLE, id);
        let value = self.backend.execute(RestRequest::get(url)).await?;
        first_item(value, id)
    }

    pub async fn insert_item(&self, item: &NewCatalogItem) -> RestResult<CatalogRecord> {
        let url = table_url(&self.base_url, ITEMS_TABLE);
        let body = serde_json::to_value(item)?;
        let value = self.backend.execute(RestRequest::post_json(url, body)).await?;
        first_item(value, "(new)")
    }

    /// Apply a patch; an empty patch only reads the row.
    pub async fn patch_item(&self, id: &str, patch: &CatalogItemPatch) -> RestResult<CatalogRecord> {
        if patch.is_empty() {
            return self.get_item(id).await;
        }
        let url = row_url(&self.base_url, ITEMS_TABLE, id);
        let body = serde_json::to_value(patch)?;
        let value = self.backend.execute(RestRequest::patch_json(url, body)).await?;
        first_item(value, id)
    }

    pub async fn remove_item(&self, id: &str) -> RestResult<()> {
        let url = row_url(&self.base_url, ITEMS_TABLE, id);
        let value = self.backend.execute(RestRequest::delete(url)).await?;
        first_item(value, id).map(|_| ())
    }
}
