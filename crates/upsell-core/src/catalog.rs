//! Catalog records as returned by the product search endpoint.
//!
//! ## Observed shape
//!
//! The endpoint answers with a bare JSON array of products. Each product
//! carries an `image` object (or `null`) and an ordered `variants` array.
//!
//! ### `price`
//! Usually a decimal string such as `"25.00"`, but some fixtures send a bare
//! JSON number. [`Price`] accepts both and keeps the text as-is so nothing is
//! lost to float rounding.
//!
//! ### `product_id`
//! Variants and images repeat their parent's id. We keep it when present but
//! never rely on it; the nesting already says which product owns a variant.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A product returned by a catalog search. Replaced wholesale on every
/// successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Numeric product id.
    pub id: i64,

    /// Display title (e.g. `"Fog Linen Chambray Towel - Beige Stripe"`).
    pub title: String,

    /// Primary image; `null` or absent for products without one.
    #[serde(default)]
    pub image: Option<CatalogImage>,

    /// Purchasable variants in catalog order. Ids are unique within the item.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl CatalogItem {
    /// Looks up one of this item's variants by id.
    #[must_use]
    pub fn variant(&self, variant_id: i64) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Returns `true` if `variant_id` belongs to this item.
    #[must_use]
    pub fn has_variant(&self, variant_id: i64) -> bool {
        self.variant(variant_id).is_some()
    }

    /// All variant ids in catalog order.
    #[must_use]
    pub fn variant_ids(&self) -> Vec<i64> {
        self.variants.iter().map(|v| v.id).collect()
    }
}

/// A single purchasable variant of a [`CatalogItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: i64,

    /// Parent product id, when the endpoint repeats it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,

    /// Variant title, e.g. `"S / White / Cotton"`.
    pub title: String,

    pub price: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,

    /// CDN URL of the image.
    pub src: String,
}

/// Price text exactly as the catalog sent it, e.g. `"25.00"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(String);

impl Price {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the price text as a decimal. `None` when the catalog sent
    /// something that is not a number.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(self.0.trim()).ok()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPrice {
            Text(String),
            Integer(i64),
            Float(f64),
        }

        Ok(match RawPrice::deserialize(deserializer)? {
            RawPrice::Text(s) => Price(s),
            RawPrice::Integer(n) => Price(n.to_string()),
            RawPrice::Float(n) => Price(n.to_string()),
        })
    }
}
