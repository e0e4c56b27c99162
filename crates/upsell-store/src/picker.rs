//! The product picker dialog: stages one product and some of its variants
//! for a single slot before committing them to the store.

use upsell_core::{CatalogItem, SelectedProduct, SlotId};

use crate::error::{PickerError, StoreError};
use crate::persist::SessionStorage;
use crate::state::StoreState;
use crate::store::Store;

/// The product and variants chosen in the dialog but not yet saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedSelection {
    item: CatalogItem,
    variants: Vec<i64>,
}

impl StagedSelection {
    #[must_use]
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// Staged variant ids in the order they were picked.
    #[must_use]
    pub fn variants(&self) -> &[i64] {
        &self.variants
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum PickerState {
    #[default]
    Closed,
    Open {
        slot: SlotId,
        staged: Option<StagedSelection>,
    },
}

/// Single-select staging for one slot.
///
/// The target slot is held by id, so reordering the list while the dialog is
/// open still saves into the slot it was opened for.
#[derive(Debug, Clone, Default)]
pub struct PickerDialog {
    state: PickerState,
}

impl PickerDialog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog for the slot at `index`, staging whatever that slot
    /// already holds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SlotOutOfRange`] (wrapped) if there is no slot
    /// at `index`.
    pub fn open(&mut self, state: &StoreState, index: usize) -> Result<(), PickerError> {
        let len = state.slot_count();
        let slot = state
            .slot(index)
            .ok_or(StoreError::SlotOutOfRange { index, len })?;
        let staged = slot.product.as_ref().map(|p| StagedSelection {
            item: p.item.clone(),
            variants: p.selected_variants.clone(),
        });
        self.state = PickerState::Open {
            slot: slot.id,
            staged,
        };
        Ok(())
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, PickerState::Open { .. })
    }

    #[must_use]
    pub fn target_slot(&self) -> Option<SlotId> {
        match &self.state {
            PickerState::Open { slot, .. } => Some(*slot),
            PickerState::Closed => None,
        }
    }

    #[must_use]
    pub fn staged(&self) -> Option<&StagedSelection> {
        match &self.state {
            PickerState::Open { staged, .. } => staged.as_ref(),
            PickerState::Closed => None,
        }
    }

    /// Number of staged products, 0 or 1.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        usize::from(self.staged().is_some())
    }

    /// Whether the "Add" button is enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.selected_count() > 0
    }

    #[must_use]
    pub fn is_item_staged(&self, item_id: i64) -> bool {
        self.staged().is_some_and(|s| s.item.id == item_id)
    }

    #[must_use]
    pub fn is_variant_staged(&self, variant_id: i64) -> bool {
        self.staged().is_some_and(|s| s.variants.contains(&variant_id))
    }

    /// Clicks the checkbox of `item_id` in the result list. Clicking the
    /// staged product again clears the staging; clicking another product
    /// stages it with all of its variants.
    ///
    /// # Errors
    ///
    /// [`PickerError::Closed`] if the dialog is closed,
    /// [`PickerError::UnknownItem`] if `item_id` is not among `items`.
    pub fn select_item(&mut self, items: &[CatalogItem], item_id: i64) -> Result<(), PickerError> {
        let PickerState::Open { staged, .. } = &mut self.state else {
            return Err(PickerError::Closed);
        };
        let item = items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or(PickerError::UnknownItem(item_id))?;

        if staged.as_ref().is_some_and(|s| s.item.id == item_id) {
            *staged = None;
        } else {
            *staged = Some(StagedSelection {
                item: item.clone(),
                variants: item.variant_ids(),
            });
        }
        Ok(())
    }

    /// Flips one variant of the staged product in or out. Added variants go
    /// to the end of the staged order.
    ///
    /// # Errors
    ///
    /// [`PickerError::Closed`], [`PickerError::NothingStaged`], or
    /// [`PickerError::UnknownVariant`] if the variant is not the staged
    /// product's.
    pub fn toggle_variant(&mut self, variant_id: i64) -> Result<(), PickerError> {
        let PickerState::Open { staged, .. } = &mut self.state else {
            return Err(PickerError::Closed);
        };
        let staged = staged.as_mut().ok_or(PickerError::NothingStaged)?;
        if !staged.item.has_variant(variant_id) {
            return Err(PickerError::UnknownVariant {
                product_id: staged.item.id,
                variant_id,
            });
        }

        if let Some(pos) = staged.variants.iter().position(|id| *id == variant_id) {
            staged.variants.remove(pos);
        } else {
            staged.variants.push(variant_id);
        }
        Ok(())
    }

    /// Commits the staged product into the target slot and closes the dialog.
    /// Returns the index it was committed at.
    ///
    /// # Errors
    ///
    /// [`PickerError::NothingStaged`] leaves the store untouched and the
    /// dialog open. A store error also keeps the dialog open.
    pub fn save<S: SessionStorage>(&mut self, store: &mut Store<S>) -> Result<usize, PickerError> {
        let PickerState::Open { slot, staged } = &self.state else {
            return Err(PickerError::Closed);
        };
        let staged = staged.as_ref().ok_or(PickerError::NothingStaged)?;
        let index = store
            .state()
            .slot_index(*slot)
            .ok_or(StoreError::UnknownSlot(*slot))?;

        let product = SelectedProduct::new(staged.item.clone(), staged.variants.clone())
            .map_err(StoreError::from)?;
        store.commit_slot(index, product)?;

        tracing::debug!(slot = %slot, index, "picker saved");
        self.state = PickerState::Closed;
        Ok(index)
    }

    /// Discards anything staged and closes.
    pub fn cancel(&mut self) {
        self.state = PickerState::Closed;
    }
}

#[cfg(test)]
#[path = "picker_test.rs"]
mod tests;
