//! # Error Types
//!
//! Top-level error type for the foundational primitives. Lifecycle and
//! transport errors live next to the code that produces them
//! (`catalog-state`, `catalog-client`).

use thiserror::Error;

/// Errors raised while constructing or parsing core primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A timestamp string could not be parsed, or was not UTC.
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An entity kind name was not recognised.
    #[error("unknown entity kind {0:?}; expected one of announcement, product, category, voucher")]
    UnknownEntityKind(String),

    /// A field name was not recognised.
    #[error("unknown field {0:?}")]
    UnknownField(String),
}
