//! Gesture state for the two drag-and-drop lists.
//!
//! Slots reorder live while the pointer hovers over other rows; variants
//! inside one card reorder once, on drop.

use upsell_core::SlotId;

use crate::error::StoreError;
use crate::state::StoreState;

/// A slot being dragged. Tracks the slot by id, so its current position is
/// always read from the store rather than carried along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotDrag {
    slot: SlotId,
}

impl SlotDrag {
    /// Picks up the slot currently at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SlotOutOfRange`] if there is no such slot.
    pub fn begin(state: &StoreState, index: usize) -> Result<Self, StoreError> {
        let len = state.slot_count();
        let slot = state
            .slot(index)
            .ok_or(StoreError::SlotOutOfRange { index, len })?;
        Ok(Self { slot: slot.id })
    }

    #[must_use]
    pub fn slot(&self) -> SlotId {
        self.slot
    }

    /// The move implied by hovering over `target`: `Some((from, to))` when the
    /// dragged slot currently sits somewhere else, `None` when it is already
    /// there or no longer in the list.
    #[must_use]
    pub fn hover(&self, state: &StoreState, target: usize) -> Option<(usize, usize)> {
        let from = state.slot_index(self.slot)?;
        (from != target).then_some((from, target))
    }
}

/// Result of a finished variant drag. `destination` is `None` when the
/// variant was dropped outside the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantDrop {
    pub source: usize,
    pub destination: Option<usize>,
}

impl VariantDrop {
    #[must_use]
    pub fn new(source: usize, destination: Option<usize>) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// `Some((from, to))` if the drop moves anything.
    #[must_use]
    pub fn moves(&self) -> Option<(usize, usize)> {
        self.destination
            .filter(|to| *to != self.source)
            .map(|to| (self.source, to))
    }
}

#[cfg(test)]
mod tests {
    use upsell_core::Slot;

    use super::*;

    fn state_with(n: usize) -> StoreState {
        let mut state = StoreState::default();
        state.slots = (0..n).map(|_| Slot::empty()).collect();
        state
    }

    #[test]
    fn hover_reports_move_from_current_position() {
        let state = state_with(3);
        let drag = SlotDrag::begin(&state, 2).unwrap();
        assert_eq!(drag.hover(&state, 0), Some((2, 0)));
        assert_eq!(drag.hover(&state, 2), None);
    }

    #[test]
    fn hover_after_slot_removed_is_none() {
        let state = state_with(3);
        let drag = SlotDrag::begin(&state, 1).unwrap();
        let shorter = state_with(2);
        assert_eq!(drag.hover(&shorter, 0), None);
    }

    #[test]
    fn begin_past_end_fails() {
        let state = state_with(1);
        assert!(matches!(
            SlotDrag::begin(&state, 1),
            Err(StoreError::SlotOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn variant_drop_moves() {
        assert_eq!(VariantDrop::new(0, Some(2)).moves(), Some((0, 2)));
        assert_eq!(VariantDrop::new(1, Some(1)).moves(), None);
        assert_eq!(VariantDrop::new(1, None).moves(), None);
    }
}
