//! Working set for one category view.
//!
//! The store owns the loaded items, the derived tag index and the tag
//! filter. Loading is split in two halves so that a renderer can run the
//! fetch on its own task:
//!
//! ```text
//! begin_load(category) -> LoadTicket
//!          │
//!          ▼
//! CatalogFetcher::fetch(ticket) -> LoadOutcome     (no &mut store held)
//!          │
//!          ▼
//! complete_load(outcome)                           (stale tickets are dropped)
//! ```
//!
//! Every `begin_load` bumps a generation counter; only the outcome carrying
//! the current generation is applied. [`CatalogStore::load`] runs all three
//! steps in sequence.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{CatalogItem, CatalogRecord, Category};
use crate::events::CatalogEvent;
use crate::filter::{FilterState, TagFilter};
use crate::ports::{CatalogEventEmitter, CatalogRepository, CoreError, RepositoryError};
use crate::settings::DEFAULT_FETCH_TIMEOUT_SECS;
use crate::tags::compute_tag_index;

/// Load lifecycle of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing requested yet, or the last request was cancelled.
    #[default]
    Idle,
    /// A fetch is in flight; the previous items have been discarded.
    Loading,
    /// Items for the current category are available.
    Ready,
    /// The last fetch failed.
    Failed {
        /// Error description.
        error: String,
    },
}

/// Handle for one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    category: Category,
}

impl LoadTicket {
    pub const fn category(&self) -> Category {
        self.category
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of running a [`LoadTicket`] against the repository.
#[derive(Debug)]
pub struct LoadOutcome {
    ticket: LoadTicket,
    result: Result<Vec<CatalogRecord>, RepositoryError>,
}

impl LoadOutcome {
    pub const fn new(ticket: LoadTicket, result: Result<Vec<CatalogRecord>, RepositoryError>) -> Self {
        Self { ticket, result }
    }

    pub const fn ticket(&self) -> LoadTicket {
        self.ticket
    }
}

/// Runs catalog fetches with a timeout.
///
/// Cheap to clone; holds only the repository handle.
#[derive(Clone)]
pub struct CatalogFetcher {
    repo: Arc<dyn CatalogRepository>,
    timeout: Duration,
}

impl CatalogFetcher {
    pub fn new(repo: Arc<dyn CatalogRepository>, timeout: Duration) -> Self {
        Self { repo, timeout }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the ticket's category. A fetch exceeding the timeout resolves
    /// to [`RepositoryError::Timeout`].
    pub async fn fetch(&self, ticket: LoadTicket) -> LoadOutcome {
        let category = ticket.category;
        let result = tokio::time::timeout(self.timeout, self.repo.fetch_items(category))
            .await
            .unwrap_or_else(|_| {
                Err(RepositoryError::Timeout(format!(
                    "loading {category} took longer than {}s",
                    self.timeout.as_secs()
                )))
            });
        LoadOutcome { ticket, result }
    }
}

/// Catalog view state for a single category.
pub struct CatalogStore {
    fetcher: CatalogFetcher,
    emitter: Arc<dyn CatalogEventEmitter>,
    category: Option<Category>,
    items: Vec<CatalogItem>,
    tag_index: Vec<String>,
    filter: TagFilter,
    phase: LoadPhase,
    generation: u64,
}

impl CatalogStore {
    /// Create an empty store using the default fetch timeout.
    pub fn new(repo: Arc<dyn CatalogRepository>, emitter: Arc<dyn CatalogEventEmitter>) -> Self {
        Self {
            fetcher: CatalogFetcher::new(repo, Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)),
            emitter,
            category: None,
            items: Vec::new(),
            tag_index: Vec::new(),
            filter: TagFilter::new(),
            phase: LoadPhase::Idle,
            generation: 0,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetcher.timeout = timeout;
        self
    }

    /// Fetcher for running a ticket outside the store borrow.
    pub fn fetcher(&self) -> CatalogFetcher {
        self.fetcher.clone()
    }

    /// Start loading `category`.
    ///
    /// Previous items and the tag index are discarded immediately. The tag
    /// selection survives only when reloading the same category.
    pub fn begin_load(&mut self, category: Category) -> LoadTicket {
        self.generation += 1;
        if self.category != Some(category) {
            self.filter.clear();
        }
        self.category = Some(category);
        self.items.clear();
        self.tag_index.clear();
        self.phase = LoadPhase::Loading;

        debug!(%category, generation = self.generation, "Loading catalog");
        self.emitter.emit(CatalogEvent::load_started(category));

        LoadTicket {
            generation: self.generation,
            category,
        }
    }

    /// Apply a finished fetch.
    ///
    /// Returns `Ok(false)` when the outcome belongs to a superseded request
    /// and was dropped.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> Result<bool, CoreError> {
        let LoadOutcome { ticket, result } = outcome;
        if ticket.generation != self.generation {
            debug!(
                category = %ticket.category,
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale catalog load"
            );
            return Ok(false);
        }

        match result {
            Ok(records) => {
                self.items = records.into_iter().map(CatalogItem::from_record).collect();
                self.tag_index = compute_tag_index(&self.items);
                self.phase = LoadPhase::Ready;

                info!(
                    category = %ticket.category,
                    count = self.items.len(),
                    tags = self.tag_index.len(),
                    "Catalog loaded"
                );
                self.emitter.emit(CatalogEvent::Loaded {
                    category: ticket.category,
                    count: self.items.len(),
                    tags: self.tag_index.clone(),
                });
                Ok(true)
            }
            Err(e) => {
                warn!(category = %ticket.category, error = %e, "Failed to load catalog");
                self.phase = LoadPhase::Failed {
                    error: e.to_string(),
                };
                self.emitter
                    .emit(CatalogEvent::load_failed(ticket.category, e.to_string()));
                Err(CoreError::Repository(e))
            }
        }
    }

    /// Load `category` and return its items in store order.
    pub async fn load(&mut self, category: Category) -> Result<&[CatalogItem], CoreError> {
        let ticket = self.begin_load(category);
        let outcome = self.fetcher.fetch(ticket).await;
        self.complete_load(outcome)?;
        Ok(&self.items)
    }

    /// Load the current category again, keeping the tag selection.
    pub async fn reload(&mut self) -> Result<&[CatalogItem], CoreError> {
        let category = self
            .category
            .ok_or_else(|| CoreError::Validation("No category has been loaded".to_string()))?;
        self.load(category).await
    }

    /// Reload when `event` reports a change to the loaded category.
    ///
    /// Returns whether a reload happened.
    pub async fn refresh_on(&mut self, event: &CatalogEvent) -> Result<bool, CoreError> {
        match self.category {
            Some(category) if event.invalidates(category) => {
                self.load(category).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Abandon the in-flight load, if any. Its outcome will be dropped.
    pub fn cancel(&mut self) {
        self.generation += 1;
        if self.phase == LoadPhase::Loading {
            debug!(category = ?self.category, "Cancelled catalog load");
            self.phase = LoadPhase::Idle;
        }
    }

    /// Toggle `tag` in the selection. Returns whether it is now selected.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let selected = self.filter.toggle(tag);
        self.emit_filter_changed();
        selected
    }

    /// Empty the selection.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.emit_filter_changed();
    }

    /// Items passing the tag filter, in store order.
    pub fn visible(&self) -> Vec<&CatalogItem> {
        self.filter.visible(&self.items)
    }

    /// Visible items that have an image to show.
    pub fn visible_with_images(&self) -> Vec<&CatalogItem> {
        self.filter
            .visible(&self.items)
            .into_iter()
            .filter(|item| item.image_url().is_some())
            .collect()
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn tag_index(&self) -> &[String] {
        &self.tag_index
    }

    pub const fn filter(&self) -> &TagFilter {
        &self.filter
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter.state()
    }

    pub fn selected_tags(&self) -> Vec<String> {
        self.filter.selected().map(str::to_string).collect()
    }

    pub const fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    fn emit_filter_changed(&self) {
        let selected = self.selected_tags();
        let visible = self.filter.visible(&self.items).len();
        debug!(?selected, visible, "Tag filter changed");
        self.emitter
            .emit(CatalogEvent::FilterChanged { selected, visible });
    }
}
