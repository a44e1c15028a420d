//! # catalog-core — Foundational Types for the Catalog Console
//!
//! Shared primitives used by every other crate in the workspace. This crate
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `EntityId` wraps the backend's opaque integer
//!    key so it cannot be confused with a priority or a counter.
//!
//! 2. **Single `EntityKind` enum.** Announcement, Product, Category, and
//!    Voucher are the four lifecycle-managed collections. Exhaustive `match`
//!    everywhere; adding a kind forces every consumer to handle it.
//!
//! 3. **UTC-only timestamps.** `Timestamp` is UTC, seconds precision, and
//!    totally ordered, so expiry comparisons are unambiguous.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod kind;
pub mod temporal;

pub use error::CatalogError;
pub use identity::EntityId;
pub use kind::EntityKind;
pub use temporal::Timestamp;
