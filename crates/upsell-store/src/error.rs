use std::path::PathBuf;

use thiserror::Error;
use upsell_core::{ReorderError, SelectionError, SlotId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("slot {index} does not exist (slot count is {len})")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("slot {index} has no product")]
    EmptySlot { index: usize },

    #[error("slot {0} is no longer in the list")]
    UnknownSlot(SlotId),

    #[error("the slot list cannot be empty")]
    NoSlots,

    #[error("slot {0} appears more than once")]
    DuplicateSlot(SlotId),

    #[error("the first slot cannot be removed")]
    FirstSlotLocked,

    #[error("slot {index} must keep at least one variant")]
    LastVariant { index: usize },

    #[error("variant {variant_id} is not selected in slot {index}")]
    VariantNotSelected { index: usize, variant_id: i64 },

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Reorder(#[from] ReorderError),

    #[error("failed to persist snapshot: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("session storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("the picker is not open")]
    Closed,

    #[error("product {0} is not in the current search results")]
    UnknownItem(i64),

    #[error("no product is staged")]
    NothingStaged,

    #[error("variant {variant_id} does not belong to product {product_id}")]
    UnknownVariant { product_id: i64, variant_id: i64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}
