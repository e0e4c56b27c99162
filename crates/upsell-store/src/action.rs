use upsell_core::{CatalogItem, Discount, SelectedProduct, Slot};

/// Every change the store can make, applied by [`crate::reduce`].
#[derive(Debug, Clone)]
pub enum Action {
    /// Stores the query text. Does not fetch.
    SetSearchTerm(String),
    /// A fetch was issued; it becomes the only one allowed to land.
    FetchStarted { generation: u64 },
    FetchSucceeded {
        generation: u64,
        items: Vec<CatalogItem>,
    },
    FetchFailed { generation: u64, error: String },
    /// Puts `product` into the existing slot at `index`.
    CommitSlot {
        index: usize,
        product: SelectedProduct,
    },
    /// Replaces the whole slot list (reorder, add, remove).
    ReplaceSlots(Vec<Slot>),
    /// Rewrites membership and order of one slot's selected variants.
    SetSlotVariants { index: usize, variants: Vec<i64> },
    SetSlotDiscount {
        index: usize,
        discount: Option<Discount>,
    },
}

impl Action {
    /// Whether the store writes a snapshot after applying this action.
    /// Only slot mutations do; search state rides along with the next one.
    #[must_use]
    pub fn persists(&self) -> bool {
        matches!(
            self,
            Action::CommitSlot { .. }
                | Action::ReplaceSlots(_)
                | Action::SetSlotVariants { .. }
                | Action::SetSlotDiscount { .. }
        )
    }

    /// Short name for log lines.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetSearchTerm(_) => "set_search_term",
            Action::FetchStarted { .. } => "fetch_started",
            Action::FetchSucceeded { .. } => "fetch_succeeded",
            Action::FetchFailed { .. } => "fetch_failed",
            Action::CommitSlot { .. } => "commit_slot",
            Action::ReplaceSlots(_) => "replace_slots",
            Action::SetSlotVariants { .. } => "set_slot_variants",
            Action::SetSlotDiscount { .. } => "set_slot_discount",
        }
    }
}
