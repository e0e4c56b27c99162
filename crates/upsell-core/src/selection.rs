use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{CatalogItem, Variant};
use crate::discount::Discount;
use crate::error::SelectionError;

/// A catalog item chosen for a slot, together with the subset of its variants
/// the merchant kept, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedProduct {
    #[serde(flatten)]
    pub item: CatalogItem,

    /// Subset of `item`'s variant ids. Order is significant, duplicates are
    /// not allowed.
    #[serde(default)]
    pub selected_variants: Vec<i64>,
}

impl SelectedProduct {
    /// Builds a selection after checking that every id belongs to `item` and
    /// appears once.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] for unknown or repeated variant ids.
    pub fn new(item: CatalogItem, selected_variants: Vec<i64>) -> Result<Self, SelectionError> {
        validate_variants(&item, &selected_variants)?;
        Ok(Self {
            item,
            selected_variants,
        })
    }

    /// Selects every variant of `item`, in catalog order.
    #[must_use]
    pub fn with_all_variants(item: CatalogItem) -> Self {
        let selected_variants = item.variant_ids();
        Self {
            item,
            selected_variants,
        }
    }

    #[must_use]
    pub fn id(&self) -> i64 {
        self.item.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.item.title
    }

    /// Selected variants resolved against the item, in selection order.
    /// Ids that no longer resolve are skipped.
    #[must_use]
    pub fn selected_variant_details(&self) -> Vec<&Variant> {
        self.selected_variants
            .iter()
            .filter_map(|id| self.item.variant(*id))
            .collect()
    }
}

/// Checks `ids` against `item`: every id must be one of its variants, and no
/// id may repeat.
///
/// # Errors
///
/// Returns the first violation found, scanning `ids` in order.
pub fn validate_variants(item: &CatalogItem, ids: &[i64]) -> Result<(), SelectionError> {
    let mut seen = HashSet::with_capacity(ids.len());
    for &variant_id in ids {
        if !item.has_variant(variant_id) {
            return Err(SelectionError::UnknownVariant {
                product_id: item.id,
                variant_id,
            });
        }
        if !seen.insert(variant_id) {
            return Err(SelectionError::DuplicateVariant {
                product_id: item.id,
                variant_id,
            });
        }
    }
    Ok(())
}

/// Stable identity of a slot, independent of its position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(Uuid);

impl SlotId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One row of the list the merchant is building. May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(rename = "slotId")]
    pub id: SlotId,

    #[serde(default)]
    pub product: Option<SelectedProduct>,

    #[serde(default)]
    pub discount: Option<Discount>,
}

impl Slot {
    /// A fresh slot with a new id and nothing in it.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: SlotId::new(),
            product: None,
            discount: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.product.is_none()
    }
}
