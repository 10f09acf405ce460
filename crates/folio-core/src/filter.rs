//! Tag filter over a loaded item set.
//!
//! Selection uses OR semantics: an item is visible when it carries at least
//! one selected tag, so selecting more tags can only grow the visible set.
//! An empty selection shows everything.

use std::collections::BTreeSet;

use crate::domain::CatalogItem;

/// The two states of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// No tags selected; every loaded item is visible.
    Unfiltered,
    /// At least one tag selected.
    Filtered,
}

/// Mutable set of selected tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    selected: BTreeSet<String>,
}

impl TagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tag` if absent, remove it if present.
    ///
    /// Returns whether the tag is selected afterwards. Any string is
    /// accepted, including tags that no loaded item carries.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.selected.remove(tag) {
            false
        } else {
            self.selected.insert(tag.to_string());
            true
        }
    }

    /// Drop every selected tag.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected.contains(tag)
    }

    /// Selected tags in ascending order.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn state(&self) -> FilterState {
        if self.selected.is_empty() {
            FilterState::Unfiltered
        } else {
            FilterState::Filtered
        }
    }

    /// Whether `item` passes the filter.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.selected.is_empty() || item.tags.iter().any(|t| self.selected.contains(t))
    }

    /// Items that pass the filter, in their loaded order.
    pub fn visible<'a>(&self, items: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for TagFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().map(Into::into).collect(),
        }
    }
}
