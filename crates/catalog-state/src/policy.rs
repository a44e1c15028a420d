//! # Lifecycle Policies
//!
//! Per-kind parameters of the lifecycle. The decision logic is identical for
//! every kind; only these values differ.

use catalog_core::EntityKind;
use serde::{Deserialize, Serialize};

/// Inclusive range of acceptable priority values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriorityRange {
    /// Lowest accepted priority.
    pub min: i32,
    /// Highest accepted priority.
    pub max: i32,
}

impl PriorityRange {
    /// Create a range `min..=max`.
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Whether `priority` lies within the range.
    pub fn contains(&self, priority: i32) -> bool {
        (self.min..=self.max).contains(&priority)
    }
}

impl std::fmt::Display for PriorityRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Lifecycle parameters of one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecyclePolicy {
    /// The kind this policy governs.
    pub kind: EntityKind,
    /// Accepted priorities while active. `None` means the kind is unranked:
    /// activation takes no priority and skips the uniqueness check.
    pub priority: Option<PriorityRange>,
    /// Wire name of the end date field, or `None` if the kind has no end date.
    pub end_date_field: Option<&'static str>,
}

impl LifecyclePolicy {
    /// Announcements: ranked 1–5, with an optional end date.
    pub const ANNOUNCEMENT: Self = Self {
        kind: EntityKind::Announcement,
        priority: Some(PriorityRange::new(1, 5)),
        end_date_field: Some("endDate"),
    };

    /// Products: ranked 1–10, no end date.
    pub const PRODUCT: Self = Self {
        kind: EntityKind::Product,
        priority: Some(PriorityRange::new(1, 10)),
        end_date_field: None,
    };

    /// Categories: unranked, no end date.
    pub const CATEGORY: Self = Self {
        kind: EntityKind::Category,
        priority: None,
        end_date_field: None,
    };

    /// Vouchers: unranked, with an optional expiry date.
    pub const VOUCHER: Self = Self {
        kind: EntityKind::Voucher,
        priority: None,
        end_date_field: Some("expiryDate"),
    };

    /// The built-in policy for `kind`.
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Announcement => Self::ANNOUNCEMENT,
            EntityKind::Product => Self::PRODUCT,
            EntityKind::Category => Self::CATEGORY,
            EntityKind::Voucher => Self::VOUCHER,
        }
    }

    /// Replace the priority range, e.g. from deployment configuration.
    pub fn with_priority_range(mut self, range: Option<PriorityRange>) -> Self {
        self.priority = range;
        self
    }

    /// Whether the kind carries an end date.
    pub fn tracks_end_date(&self) -> bool {
        self.end_date_field.is_some()
    }
}
