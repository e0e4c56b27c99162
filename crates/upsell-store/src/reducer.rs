//! Pure state transitions: `(state, action) -> state`.
//!
//! Nothing here touches storage or the network. The input state is never
//! modified; on error the caller keeps what it had.

use std::collections::HashSet;

use upsell_core::selection::validate_variants;

use crate::action::Action;
use crate::error::StoreError;
use crate::state::{SearchStatus, StoreState};

/// Applies `action` to a copy of `state`.
///
/// Fetch completions whose generation is not the latest issued one are
/// ignored and return the state unchanged.
///
/// # Errors
///
/// Slot actions fail with [`StoreError`] when an index is out of range, a
/// slot is empty where a product is required, the slot list would become
/// empty or repeat an id, or selected variant ids are invalid for the product.
pub fn reduce(state: &StoreState, action: Action) -> Result<StoreState, StoreError> {
    let mut next = state.clone();

    match action {
        Action::SetSearchTerm(term) => {
            next.search_term = term;
        }
        Action::FetchStarted { generation } => {
            next.latest_fetch = generation;
            next.status = SearchStatus::Loading;
        }
        Action::FetchSucceeded { generation, items } => {
            if generation == next.latest_fetch {
                next.status = SearchStatus::Succeeded;
                next.items = items;
                next.error = None;
            }
        }
        Action::FetchFailed { generation, error } => {
            if generation == next.latest_fetch {
                next.status = SearchStatus::Failed;
                next.error = Some(error);
            }
        }
        Action::CommitSlot { index, product } => {
            validate_variants(&product.item, &product.selected_variants)?;
            let len = next.slots.len();
            let slot = next
                .slots
                .get_mut(index)
                .ok_or(StoreError::SlotOutOfRange { index, len })?;
            slot.product = Some(product);
        }
        Action::ReplaceSlots(slots) => {
            if slots.is_empty() {
                return Err(StoreError::NoSlots);
            }
            let mut seen = HashSet::with_capacity(slots.len());
            for slot in &slots {
                if !seen.insert(slot.id) {
                    return Err(StoreError::DuplicateSlot(slot.id));
                }
            }
            next.slots = slots;
        }
        Action::SetSlotVariants { index, variants } => {
            let len = next.slots.len();
            let slot = next
                .slots
                .get_mut(index)
                .ok_or(StoreError::SlotOutOfRange { index, len })?;
            let product = slot
                .product
                .as_mut()
                .ok_or(StoreError::EmptySlot { index })?;
            validate_variants(&product.item, &variants)?;
            product.selected_variants = variants;
        }
        Action::SetSlotDiscount { index, discount } => {
            let len = next.slots.len();
            let slot = next
                .slots
                .get_mut(index)
                .ok_or(StoreError::SlotOutOfRange { index, len })?;
            if discount.is_some() && slot.product.is_none() {
                return Err(StoreError::EmptySlot { index });
            }
            slot.discount = discount;
        }
    }

    Ok(next)
}

#[cfg(test)]
#[path = "reducer_test.rs"]
mod tests;
