//! # catalog-state — Entity Activation Lifecycle
//!
//! Pure decision logic for the active/inactive lifecycle shared by
//! announcements, products, categories, and vouchers. Nothing here performs
//! I/O: callers fetch the current active set, ask the manager for a plan,
//! and submit that plan to the backend themselves.
//!
//! ## State Machine
//!
//! ```text
//!             activate(priority, end date)
//!  Inactive ────────────────────────────────▶ Active
//!     ▲  │                                      │
//!     │  │ delete                               │ deactivate
//!     │  ▼                                      │ (clears priority
//!     │  ⊥                                      │  and end date)
//!     └─────────────────────────────────────────┘
//! ```
//!
//! Entities are created inactive. Deleting or editing an active entity is
//! rejected with [`LockedError`]. Activation validates, in order, the
//! priority range, the end date, and priority uniqueness among active
//! siblings, stopping at the first failure.
//!
//! ## Design
//!
//! A single [`LifecycleManager<T>`] is parameterised by a
//! [`LifecyclePolicy`] (priority range, whether an end date is tracked and
//! under which wire name). The four entity kinds differ only in policy.

pub mod error;
pub mod lifecycle;
pub mod payload;
pub mod policy;
pub mod records;
pub mod voucher;

pub use error::{LockedError, ValidationError};
pub use lifecycle::{
    ActivationPlan, DeactivationPlan, LifecycleEntity, LifecycleManager, LifecycleState,
    SiblingSnapshot,
};
pub use payload::LifecyclePayload;
pub use policy::{LifecyclePolicy, PriorityRange};
pub use records::{Announcement, Category, LifecycleRecord, Product};
pub use voucher::{
    can_mutate_field, check_update, check_update_at, ApplicationType, DiscountType, Voucher,
    VoucherChanges, VoucherField,
};
