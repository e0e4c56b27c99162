use upsell_catalog::{CatalogError, CatalogSource};
use upsell_core::{reorder, CatalogItem, Discount, SelectedProduct, Slot, SlotId};

use crate::action::Action;
use crate::drag::{SlotDrag, VariantDrop};
use crate::error::StoreError;
use crate::persist::{load_snapshot, save_snapshot, SessionStorage, SNAPSHOT_KEY};
use crate::reducer::reduce;
use crate::state::StoreState;

/// Handle for one issued catalog fetch. Only the most recently issued ticket
/// can land its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    term: String,
}

impl FetchTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }
}

/// The selection store: current state plus the session storage it writes
/// snapshots to.
#[derive(Debug)]
pub struct Store<S: SessionStorage> {
    state: StoreState,
    storage: S,
}

impl<S: SessionStorage> Store<S> {
    /// Starts from the default state without reading `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            state: StoreState::default(),
            storage,
        }
    }

    /// Starts from whatever snapshot `storage` holds, or the defaults.
    pub fn hydrate(storage: S) -> Self {
        let state = load_snapshot(&storage);
        Self { state, storage }
    }

    #[must_use]
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Runs `action` through the reducer. Slot mutations are handed to
    /// [`Store::on_change`] before the new state is swapped in.
    ///
    /// # Errors
    ///
    /// Returns the reducer's error, or [`StoreError::Persist`] if the
    /// snapshot write fails. Either way the state is untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
        let persists = action.persists();
        let name = action.name();
        let next = reduce(&self.state, action)?;
        if persists {
            self.on_change(&next)?;
        }
        self.state = next;
        tracing::debug!(action = name, slots = self.state.slot_count(), "applied");
        Ok(())
    }

    /// Persistence hook: writes `next` to session storage.
    fn on_change(&mut self, next: &StoreState) -> Result<(), StoreError> {
        save_snapshot(&mut self.storage, next)?;
        Ok(())
    }

    /// Writes the current state, search term and results included, without
    /// changing it. Used when non-slot state has to outlive the process.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persist`] if the snapshot write fails.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        save_snapshot(&mut self.storage, &self.state)?;
        Ok(())
    }

    /// Drops the snapshot and returns to the default state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persist`] if the snapshot cannot be removed.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.storage.remove_item(SNAPSHOT_KEY)?;
        self.state = StoreState::default();
        Ok(())
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.dispatch_infallible(Action::SetSearchTerm(term.to_owned()));
    }

    /// Issues a new fetch generation and marks the search as loading.
    pub fn begin_fetch(&mut self, term: &str) -> FetchTicket {
        let generation = self.state.latest_fetch + 1;
        self.dispatch_infallible(Action::FetchStarted { generation });
        FetchTicket {
            generation,
            term: term.to_owned(),
        }
    }

    /// Lands the result of `ticket`'s fetch. Returns `false` when a newer
    /// fetch has been issued since, in which case nothing changes.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<CatalogItem>, CatalogError>,
    ) -> bool {
        if ticket.generation != self.state.latest_fetch {
            tracing::warn!(
                term = %ticket.term,
                generation = ticket.generation,
                latest = self.state.latest_fetch,
                "discarding result of superseded catalog search"
            );
            return false;
        }

        let action = match result {
            Ok(items) => {
                tracing::debug!(term = %ticket.term, count = items.len(), "catalog search done");
                Action::FetchSucceeded {
                    generation: ticket.generation,
                    items,
                }
            }
            Err(e) => {
                tracing::warn!(term = %ticket.term, error = %e, "catalog search failed");
                Action::FetchFailed {
                    generation: ticket.generation,
                    error: e.to_string(),
                }
            }
        };
        self.dispatch_infallible(action);
        true
    }

    /// Searches `source` for `term`: one request, status `Loading` while it
    /// runs, then `Succeeded` with new items or `Failed` with the error text.
    pub async fn fetch_catalog<C: CatalogSource>(&mut self, source: &C, term: &str) {
        let ticket = self.begin_fetch(term);
        let result = source.search(term).await;
        self.complete_fetch(&ticket, result);
    }

    /// Stores `term` and fetches it, as typing in the search box does.
    pub async fn search<C: CatalogSource>(&mut self, source: &C, term: &str) {
        self.set_search_term(term);
        self.fetch_catalog(source, term).await;
    }

    /// # Errors
    ///
    /// See [`Action::CommitSlot`] in [`reduce`].
    pub fn commit_slot(&mut self, index: usize, product: SelectedProduct) -> Result<(), StoreError> {
        self.dispatch(Action::CommitSlot { index, product })
    }

    /// # Errors
    ///
    /// See [`Action::ReplaceSlots`] in [`reduce`].
    pub fn replace_slots(&mut self, slots: Vec<Slot>) -> Result<(), StoreError> {
        self.dispatch(Action::ReplaceSlots(slots))
    }

    /// # Errors
    ///
    /// See [`Action::SetSlotVariants`] in [`reduce`].
    pub fn set_slot_variants(&mut self, index: usize, variants: Vec<i64>) -> Result<(), StoreError> {
        self.dispatch(Action::SetSlotVariants { index, variants })
    }

    /// Appends an empty slot and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persist`] if the snapshot write fails.
    pub fn add_slot(&mut self) -> Result<SlotId, StoreError> {
        let slot = Slot::empty();
        let id = slot.id;
        let mut slots = self.state.slots.clone();
        slots.push(slot);
        self.replace_slots(slots)?;
        Ok(id)
    }

    /// Removes the slot at `index` and returns it. The first slot stays.
    ///
    /// # Errors
    ///
    /// [`StoreError::FirstSlotLocked`] for index 0,
    /// [`StoreError::SlotOutOfRange`] past the end.
    pub fn remove_slot(&mut self, index: usize) -> Result<Slot, StoreError> {
        if index == 0 {
            return Err(StoreError::FirstSlotLocked);
        }
        let len = self.state.slot_count();
        if index >= len {
            return Err(StoreError::SlotOutOfRange { index, len });
        }
        let mut slots = self.state.slots.clone();
        let removed = slots.remove(index);
        self.replace_slots(slots)?;
        Ok(removed)
    }

    /// Moves the slot at `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Reorder`] for out-of-range indices.
    pub fn move_slot(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        let slots = reorder(&self.state.slots, from, to)?;
        self.replace_slots(slots)
    }

    /// Applies a hover event from a slot drag: when the dragged slot is over
    /// a different position it is moved there right away. Returns whether
    /// anything moved.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownSlot`] if the dragged slot was removed,
    /// [`StoreError::Reorder`] if `target` is past the end.
    pub fn drag_slot_over(&mut self, drag: &SlotDrag, target: usize) -> Result<bool, StoreError> {
        if self.state.slot_index(drag.slot()).is_none() {
            return Err(StoreError::UnknownSlot(drag.slot()));
        }
        match drag.hover(&self.state, target) {
            Some((from, to)) => {
                self.move_slot(from, to)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Moves one selected variant inside the slot at `index`.
    ///
    /// # Errors
    ///
    /// Out-of-range slot, empty slot, or out-of-range variant positions.
    pub fn move_variant(&mut self, index: usize, from: usize, to: usize) -> Result<(), StoreError> {
        let product = self.product_at(index)?;
        let variants = reorder(&product.selected_variants, from, to)?;
        self.set_slot_variants(index, variants)
    }

    /// Applies a finished variant drag. A drop outside the list, or onto its
    /// own position, is a no-op.
    /// Returns whether anything moved.
    ///
    /// # Errors
    ///
    /// Same as [`Store::move_variant`].
    pub fn drop_variant(&mut self, index: usize, drop: VariantDrop) -> Result<bool, StoreError> {
        match drop.moves() {
            Some((from, to)) => {
                self.move_variant(index, from, to)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Deselects `variant_id` in the slot at `index`. The last selected
    /// variant cannot be removed.
    ///
    /// # Errors
    ///
    /// [`StoreError::LastVariant`] when only one variant is left,
    /// [`StoreError::VariantNotSelected`] when it is not selected.
    pub fn remove_variant(&mut self, index: usize, variant_id: i64) -> Result<(), StoreError> {
        let product = self.product_at(index)?;
        if !product.selected_variants.contains(&variant_id) {
            return Err(StoreError::VariantNotSelected { index, variant_id });
        }
        if product.selected_variants.len() <= 1 {
            return Err(StoreError::LastVariant { index });
        }
        let variants = product
            .selected_variants
            .iter()
            .copied()
            .filter(|id| *id != variant_id)
            .collect();
        self.set_slot_variants(index, variants)
    }

    /// Sets or clears the discount of the slot at `index`.
    ///
    /// # Errors
    ///
    /// See [`Action::SetSlotDiscount`] in [`reduce`].
    pub fn set_discount(
        &mut self,
        index: usize,
        discount: Option<Discount>,
    ) -> Result<(), StoreError> {
        self.dispatch(Action::SetSlotDiscount { index, discount })
    }

    fn product_at(&self, index: usize) -> Result<&SelectedProduct, StoreError> {
        let len = self.state.slot_count();
        self.state
            .slot(index)
            .ok_or(StoreError::SlotOutOfRange { index, len })?
            .product
            .as_ref()
            .ok_or(StoreError::EmptySlot { index })
    }

    /// For actions the reducer never rejects and that do not persist.
    fn dispatch_infallible(&mut self, action: Action) {
        if let Err(e) = self.dispatch(action) {
            tracing::error!(error = %e, "unexpected store error");
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
