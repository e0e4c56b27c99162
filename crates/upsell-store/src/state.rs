use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use upsell_core::{CatalogItem, Slot, SlotId};

/// Lifecycle of the most recently issued catalog search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStatus::Idle => write!(f, "idle"),
            SearchStatus::Loading => write!(f, "loading"),
            SearchStatus::Succeeded => write!(f, "succeeded"),
            SearchStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Everything the picker knows. Serializes to the session snapshot
/// `{ items, selectedProducts, status, error, searchTerm }`.
///
/// `slots` is the one authoritative ordered list of rows and always holds at
/// least one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub(crate) items: Vec<CatalogItem>,

    #[serde(rename = "selectedProducts", default)]
    pub(crate) slots: Vec<Slot>,

    #[serde(default)]
    pub(crate) status: SearchStatus,

    #[serde(default)]
    pub(crate) error: Option<String>,

    #[serde(default)]
    pub(crate) search_term: String,

    /// Generation of the most recently issued fetch. Session-local.
    #[serde(skip)]
    pub(crate) latest_fetch: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            slots: vec![Slot::empty()],
            status: SearchStatus::Idle,
            error: None,
            search_term: String::new(),
            latest_fetch: 0,
        }
    }
}

impl StoreState {
    /// Results of the last successful search.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Current position of the slot with `id`.
    #[must_use]
    pub fn slot_index(&self, id: SlotId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Payload of the last failed search.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn latest_fetch(&self) -> u64 {
        self.latest_fetch
    }

    #[must_use]
    pub fn find_item(&self, item_id: i64) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Restores the "at least one slot" rule after loading a snapshot.
    pub(crate) fn ensure_first_slot(&mut self) {
        if self.slots.is_empty() {
            self.slots.push(Slot::empty());
        }
    }

    /// Gives every slot whose id was already seen earlier in the list a new
    /// id. Returns how many were changed.
    pub(crate) fn reissue_duplicate_slot_ids(&mut self) -> usize {
        let mut seen = HashSet::with_capacity(self.slots.len());
        let mut reissued = 0;
        for slot in &mut self.slots {
            if !seen.insert(slot.id) {
                slot.id = SlotId::new();
                seen.insert(slot.id);
                reissued += 1;
            }
        }
        reissued
    }
}
