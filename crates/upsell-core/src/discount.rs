use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DiscountError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Fixed amount off the price.
    #[default]
    Flat,
    /// Percent off the price.
    Percentage,
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountKind::Flat => write!(f, "flat"),
            DiscountKind::Percentage => write!(f, "percentage"),
        }
    }
}

impl FromStr for DiscountKind {
    type Err = DiscountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(DiscountKind::Flat),
            "percentage" | "percent" | "%" => Ok(DiscountKind::Percentage),
            other => Err(DiscountError::UnknownKind(other.to_string())),
        }
    }
}

/// A per-slot discount: "10 flat off" or "15 % off".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    value: Decimal,
    kind: DiscountKind,
}

impl Discount {
    /// # Errors
    ///
    /// Returns [`DiscountError::Negative`] for values below zero and
    /// [`DiscountError::PercentageOverHundred`] for percentages above 100.
    pub fn new(value: Decimal, kind: DiscountKind) -> Result<Self, DiscountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DiscountError::Negative(value.to_string()));
        }
        if kind == DiscountKind::Percentage && value > Decimal::ONE_HUNDRED {
            return Err(DiscountError::PercentageOverHundred(value.to_string()));
        }
        Ok(Self { value, kind })
    }

    /// Parses the free-text value typed into the discount field.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidValue`] when `raw` is not a decimal,
    /// plus everything [`Discount::new`] rejects.
    pub fn parse(raw: &str, kind: DiscountKind) -> Result<Self, DiscountError> {
        let value = Decimal::from_str(raw.trim())
            .map_err(|_| DiscountError::InvalidValue(raw.to_string()))?;
        Self::new(value, kind)
    }

    #[must_use]
    pub fn value(&self) -> Decimal {
        self.value
    }

    #[must_use]
    pub fn kind(&self) -> DiscountKind {
        self.kind
    }

    /// Price after the discount, never below zero, rounded to cents.
    #[must_use]
    pub fn apply(&self, price: Decimal) -> Decimal {
        let discounted = match self.kind {
            DiscountKind::Flat => price - self.value,
            DiscountKind::Percentage => {
                price * (Decimal::ONE_HUNDRED - self.value) / Decimal::ONE_HUNDRED
            }
        };
        discounted.max(Decimal::ZERO).round_dp(2)
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiscountKind::Flat => write!(f, "{} flat off", self.value),
            DiscountKind::Percentage => write!(f, "{}% off", self.value),
        }
    }
}
