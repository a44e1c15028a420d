//! # Lifecycle Manager
//!
//! Decides whether a requested transition is legal and which fields it must
//! change. The manager never mutates the entity it is asked about: it
//! returns a plan that the caller merges into the update sent to the
//! backend, and later into its local copy with `apply_to`.
//!
//! ## Transitions
//!
//! - `Inactive → Active`: guarded by [`LifecycleManager::plan_activate`].
//! - `Active → Inactive`: always legal; clears priority and end date.
//! - `Inactive → ⊥` (delete): legal. `Active → ⊥`: [`LockedError`].
//!
//! No transition leaves a priority set on an inactive entity.

use std::marker::PhantomData;

use catalog_core::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::{LockedError, ValidationError};
use crate::payload::LifecyclePayload;
use crate::policy::LifecyclePolicy;

// ─── State ───────────────────────────────────────────────────────────

/// Visibility state of a catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Hidden from end users. Initial state.
    Inactive,
    /// Publicly visible.
    Active,
}

impl LifecycleState {
    /// Map the backend's `isActive` flag to a state.
    pub fn from_flag(is_active: bool) -> Self {
        if is_active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Whether this is the active state.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => f.write_str("INACTIVE"),
            Self::Active => f.write_str("ACTIVE"),
        }
    }
}

// ─── Entity shape ────────────────────────────────────────────────────

/// The lifecycle-relevant shape shared by every catalog entity.
pub trait LifecycleEntity {
    /// Backend identifier.
    fn id(&self) -> EntityId;
    /// The `isActive` visibility flag.
    fn is_active(&self) -> bool;
    /// Rank among active siblings, if any.
    fn priority(&self) -> Option<i32>;
    /// When the entity stops being considered active, if set.
    fn end_date(&self) -> Option<Timestamp>;
    /// Overwrite the lifecycle fields.
    fn set_lifecycle(&mut self, is_active: bool, priority: Option<i32>, end_date: Option<Timestamp>);

    /// Current visibility state.
    fn state(&self) -> LifecycleState {
        LifecycleState::from_flag(self.is_active())
    }
}

/// One row of the active-siblings snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingSnapshot {
    /// Sibling identifier.
    pub id: EntityId,
    /// Sibling visibility flag. Rows come from an active-only query, so a
    /// missing flag reads as active.
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    /// Sibling priority.
    #[serde(default)]
    pub priority: Option<i32>,
}

fn active_by_default() -> bool {
    true
}

impl SiblingSnapshot {
    /// Snapshot any lifecycle entity.
    pub fn of<T: LifecycleEntity>(entity: &T) -> Self {
        Self {
            id: entity.id(),
            is_active: entity.is_active(),
            priority: entity.priority(),
        }
    }
}

// ─── Plans ───────────────────────────────────────────────────────────

/// Field changes for `Active → Active | Inactive → Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationPlan {
    /// Entity being activated.
    pub id: EntityId,
    /// Always `true`.
    pub is_active: bool,
    /// The validated priority (`None` for unranked kinds).
    pub priority: Option<i32>,
    /// The validated end date, if any.
    pub end_date: Option<Timestamp>,
}

impl ActivationPlan {
    /// Merge this plan into a local copy of the entity.
    pub fn apply_to<T: LifecycleEntity>(&self, entity: &mut T) {
        entity.set_lifecycle(true, self.priority, self.end_date);
    }
}

/// Field changes for `→ Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivationPlan {
    /// Entity being deactivated.
    pub id: EntityId,
    /// Always `false`.
    pub is_active: bool,
    /// Always `None`.
    pub priority: Option<i32>,
    /// Always `None`.
    pub end_date: Option<Timestamp>,
}

impl DeactivationPlan {
    /// Merge this plan into a local copy of the entity.
    pub fn apply_to<T: LifecycleEntity>(&self, entity: &mut T) {
        entity.set_lifecycle(false, None, None);
    }
}

// ─── Manager ─────────────────────────────────────────────────────────

/// Lifecycle decisions for one entity kind.
///
/// The same manager type serves every kind; behaviour differences come from
/// the [`LifecyclePolicy`] it is built with.
#[derive(Debug, Clone)]
pub struct LifecycleManager<T> {
    policy: LifecyclePolicy,
    _entity: PhantomData<fn(&T)>,
}

impl<T: LifecycleEntity> LifecycleManager<T> {
    /// Create a manager governed by `policy`.
    pub fn new(policy: LifecyclePolicy) -> Self {
        Self {
            policy,
            _entity: PhantomData,
        }
    }

    /// The governing policy.
    pub fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    /// Whether content fields may be edited. Active entities are read-only.
    pub fn can_edit(&self, entity: &T) -> bool {
        !entity.is_active()
    }

    /// Like [`can_edit`](Self::can_edit), but reports the lock.
    pub fn require_editable(&self, entity: &T) -> Result<(), LockedError> {
        self.ensure_inactive(entity)
    }

    /// Whether the entity may be deleted. Active entities may not.
    pub fn can_delete(&self, entity: &T) -> Result<(), LockedError> {
        self.ensure_inactive(entity)
    }

    /// Plan a deactivation. Always legal; clears priority and end date.
    pub fn plan_deactivate(&self, entity: &T) -> DeactivationPlan {
        DeactivationPlan {
            id: entity.id(),
            is_active: false,
            priority: None,
            end_date: None,
        }
    }

    /// Plan an activation, deciding "now" from the system clock.
    ///
    /// `active_siblings` must be a fresh snapshot of the kind's active set;
    /// see [`plan_activate_at`](Self::plan_activate_at) for the checks.
    pub fn plan_activate(
        &self,
        entity: &T,
        candidate_priority: Option<i32>,
        candidate_end_date: Option<Timestamp>,
        active_siblings: &[SiblingSnapshot],
    ) -> Result<ActivationPlan, ValidationError> {
        self.plan_activate_at(
            entity,
            candidate_priority,
            candidate_end_date,
            active_siblings,
            Timestamp::now(),
        )
    }

    /// Plan an activation against an explicit decision time.
    ///
    /// Checks run in order and stop at the first failure:
    ///
    /// 1. The priority is present and within the policy range (or absent for
    ///    an unranked kind), else `priority_out_of_range`.
    /// 2. A supplied end date is strictly after `now`, else `expiry_in_past`.
    /// 3. No active sibling other than `entity` holds the priority, else
    ///    `priority_duplicate`.
    ///
    /// Kinds without an end date accept and validate one but drop it from
    /// the plan.
    pub fn plan_activate_at(
        &self,
        entity: &T,
        candidate_priority: Option<i32>,
        candidate_end_date: Option<Timestamp>,
        active_siblings: &[SiblingSnapshot],
        now: Timestamp,
    ) -> Result<ActivationPlan, ValidationError> {
        let kind = self.policy.kind;

        match (self.policy.priority, candidate_priority) {
            (Some(range), Some(p)) if range.contains(p) => {}
            (None, None) => {}
            (allowed, priority) => {
                return Err(ValidationError::PriorityOutOfRange {
                    kind,
                    priority,
                    allowed,
                });
            }
        }

        if let Some(end_date) = candidate_end_date {
            if end_date <= now {
                return Err(ValidationError::ExpiryInPast { end_date, now });
            }
        }

        if let Some(priority) = candidate_priority {
            let id = entity.id();
            let holder = active_siblings
                .iter()
                .find(|s| s.is_active && s.id != id && s.priority == Some(priority));
            if let Some(holder) = holder {
                return Err(ValidationError::PriorityDuplicate {
                    kind,
                    priority,
                    holder: holder.id,
                });
            }
        }

        Ok(ActivationPlan {
            id: entity.id(),
            is_active: true,
            priority: candidate_priority,
            end_date: candidate_end_date.filter(|_| self.policy.tracks_end_date()),
        })
    }

    /// Render an activation plan as the backend update payload.
    pub fn activation_payload(&self, plan: &ActivationPlan) -> LifecyclePayload {
        LifecyclePayload::new(&self.policy, plan.id, true, plan.priority, plan.end_date)
    }

    /// Render a deactivation plan as the backend update payload.
    pub fn deactivation_payload(&self, plan: &DeactivationPlan) -> LifecyclePayload {
        LifecyclePayload::new(&self.policy, plan.id, false, None, None)
    }

    fn ensure_inactive(&self, entity: &T) -> Result<(), LockedError> {
        if entity.is_active() {
            return Err(LockedError::Active {
                kind: self.policy.kind,
                id: entity.id(),
            });
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
