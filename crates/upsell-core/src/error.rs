use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Raised by [`crate::reorder`] when either index falls outside the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("cannot move {from} -> {to} in a sequence of length {len}")]
    OutOfBounds { from: usize, to: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    #[error("discount value must not be negative (got {0})")]
    Negative(String),

    #[error("percentage discount must be at most 100 (got {0})")]
    PercentageOverHundred(String),

    #[error("invalid discount value \"{0}\"")]
    InvalidValue(String),

    #[error("unknown discount kind \"{0}\" (expected \"flat\" or \"percentage\")")]
    UnknownKind(String),
}

/// Violations of the `selected_variants` invariants of a selected product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("variant {variant_id} does not belong to product {product_id}")]
    UnknownVariant { product_id: i64, variant_id: i64 },

    #[error("variant {variant_id} is selected more than once for product {product_id}")]
    DuplicateVariant { product_id: i64, variant_id: i64 },
}
