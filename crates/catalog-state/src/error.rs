//! # Lifecycle Errors
//!
//! Every rejection is a typed, user-correctable value. None of these are
//! transient; callers surface them and let the operator fix the input.

use catalog_core::{EntityId, EntityKind, Timestamp};
use thiserror::Error;

use crate::policy::PriorityRange;
use crate::voucher::VoucherField;

/// The entity is active, so the requested operation is blocked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockedError {
    /// Deactivate the entity first.
    #[error("{kind} {id} is active; deactivate it first")]
    Active {
        /// Kind of the locked entity.
        kind: EntityKind,
        /// The locked entity.
        id: EntityId,
    },
}

impl LockedError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Active { .. } => "active",
        }
    }
}

/// Input rejected by an activation or update check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Priority missing, present on an unranked kind, or outside the range.
    #[error("priority {} is not accepted for {kind} (allowed: {})", show_priority(.priority), show_range(.allowed))]
    PriorityOutOfRange {
        /// Kind being activated.
        kind: EntityKind,
        /// The candidate priority.
        priority: Option<i32>,
        /// The configured range, if the kind is ranked.
        allowed: Option<PriorityRange>,
    },

    /// End date is not strictly after the decision time.
    #[error("end date {end_date} must be after {now}")]
    ExpiryInPast {
        /// The candidate end date.
        end_date: Timestamp,
        /// The decision time.
        now: Timestamp,
    },

    /// Another active entity already holds the priority.
    #[error("priority {priority} is already held by active {kind} {holder}")]
    PriorityDuplicate {
        /// Kind being activated.
        kind: EntityKind,
        /// The contested priority.
        priority: i32,
        /// The active sibling holding it.
        holder: EntityId,
    },

    /// A voucher field that defines the discount cannot change after use.
    #[error("voucher field {field} is locked after {used_count} use(s)")]
    FieldLocked {
        /// The locked field.
        field: VoucherField,
        /// Current usage count.
        used_count: u32,
    },

    /// A voucher usage limit may not drop below what was already used.
    #[error("usage limit {usage_limit} is below used count {used_count}")]
    UsageLimitBelowUsed {
        /// Requested limit.
        usage_limit: u32,
        /// Current usage count.
        used_count: u32,
    },

    /// Visibility changes go through activation or deactivation, never a
    /// plain field edit.
    #[error("{field} cannot be set to {requested} by an edit; use activate or deactivate")]
    TransitionViaEdit {
        /// The visibility field.
        field: VoucherField,
        /// The requested value.
        requested: bool,
    },
}

impl ValidationError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PriorityOutOfRange { .. } => "priority_out_of_range",
            Self::ExpiryInPast { .. } => "expiry_in_past",
            Self::PriorityDuplicate { .. } => "priority_duplicate",
            Self::FieldLocked { .. } => "field_locked",
            Self::UsageLimitBelowUsed { .. } => "usage_limit_below_used",
            Self::TransitionViaEdit { .. } => "transition_via_edit",
        }
    }
}

fn show_priority(priority: &Option<i32>) -> String {
    priority.map_or_else(|| "<none>".to_string(), |p| p.to_string())
}

fn show_range(range: &Option<PriorityRange>) -> String {
    range.map_or_else(|| "none".to_string(), |r| r.to_string())
}
