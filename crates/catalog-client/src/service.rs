//! # Activation Workflow
//!
//! Sequences one operator action: read the live active set, decide, and
//! commit. The two suspension points are the siblings query and the final
//! backend call; nothing is written before the final call.
//!
//! A failed siblings query aborts activation. Treating the priority as
//! unique without a snapshot would let a duplicate through silently.

use catalog_core::{EntityKind, Timestamp};
use catalog_state::{
    ActivationPlan, DeactivationPlan, LifecycleEntity, LifecycleManager, LifecyclePolicy,
    LockedError, ValidationError, Voucher, VoucherChanges,
};
use thiserror::Error;

use crate::backend::CatalogBackend;
use crate::error::ClientError;

/// Operator acknowledgement for destructive operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The operator confirmed.
    Confirmed,
    /// No confirmation was given.
    Unconfirmed,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Unconfirmed
        }
    }
}

/// Why a workflow did not commit.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Operator input was rejected before anything was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The entity is active; deactivate it first.
    #[error(transparent)]
    Locked(#[from] LockedError),
    /// A destructive operation was requested without confirmation.
    #[error("{kind} {id} deletion requires confirmation")]
    ConfirmationRequired { kind: EntityKind, id: catalog_core::EntityId },
    /// The active-siblings snapshot could not be read; activation not validated.
    #[error("cannot validate activation: active {kind} list unavailable: {source}")]
    SiblingsUnavailable {
        kind: EntityKind,
        #[source]
        source: ClientError,
    },
    /// The operation belongs to a different entity kind than this workflow.
    #[error("{requested} operation on a {kind} workflow")]
    KindMismatch {
        /// Kind this workflow governs.
        kind: EntityKind,
        /// Kind the operation needs.
        requested: EntityKind,
    },
    /// The backend rejected or failed the final call.
    #[error(transparent)]
    Backend(#[from] ClientError),
}

impl WorkflowError {
    /// Whether the operator can fix this by changing input or order of
    /// operations, as opposed to a transport or backend failure.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Locked(_) | Self::ConfirmationRequired { .. }
        )
    }

    /// Text to show the operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend(e) | Self::SiblingsUnavailable { source: e, .. } => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Lifecycle workflow for one entity kind against a backend.
#[derive(Debug, Clone)]
pub struct LifecycleService<B> {
    backend: B,
    policy: LifecyclePolicy,
}

impl<B: CatalogBackend> LifecycleService<B> {
    /// Workflow for the kind `policy` governs.
    pub fn new(backend: B, policy: LifecyclePolicy) -> Self {
        Self { backend, policy }
    }

    /// Workflow with the built-in policy for `kind`.
    pub fn for_kind(backend: B, kind: EntityKind) -> Self {
        Self::new(backend, LifecyclePolicy::for_kind(kind))
    }

    /// The governing policy.
    pub fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn manager<T: LifecycleEntity>(&self) -> LifecycleManager<T> {
        LifecycleManager::new(self.policy)
    }

    /// Activate `entity` with the given priority and optional end date.
    pub async fn activate<T: LifecycleEntity + Sync>(
        &self,
        entity: &T,
        priority: Option<i32>,
        end_date: Option<Timestamp>,
    ) -> Result<ActivationPlan, WorkflowError> {
        let kind = self.policy.kind;
        let siblings = self.backend.list_active(kind).await.map_err(|source| {
            tracing::warn!(%kind, id = %entity.id(), "active siblings unavailable; refusing activation");
            WorkflowError::SiblingsUnavailable { kind, source }
        })?;

        let manager = self.manager::<T>();
        let plan = manager
            .plan_activate(entity, priority, end_date, &siblings)
            .map_err(|e| {
                tracing::warn!(%kind, id = %entity.id(), code = e.code(), "activation rejected");
                e
            })?;
        tracing::debug!(%kind, id = %plan.id, priority = ?plan.priority, "activation planned");

        self.backend
            .submit_lifecycle(kind, &manager.activation_payload(&plan))
            .await?;
        tracing::info!(%kind, id = %plan.id, "entity activated");
        Ok(plan)
    }

    /// Deactivate `entity`, clearing its priority and end date.
    pub async fn deactivate<T: LifecycleEntity + Sync>(
        &self,
        entity: &T,
    ) -> Result<DeactivationPlan, WorkflowError> {
        let kind = self.policy.kind;
        let manager = self.manager::<T>();
        let plan = manager.plan_deactivate(entity);
        tracing::debug!(%kind, id = %plan.id, "deactivation planned");

        self.backend
            .submit_lifecycle(kind, &manager.deactivation_payload(&plan))
            .await?;
        tracing::info!(%kind, id = %plan.id, "entity deactivated");
        Ok(plan)
    }

    /// Delete an inactive entity after confirmation.
    pub async fn delete<T: LifecycleEntity + Sync>(
        &self,
        entity: &T,
        confirmation: Confirmation,
    ) -> Result<(), WorkflowError> {
        let kind = self.policy.kind;
        let id = entity.id();
        if confirmation != Confirmation::Confirmed {
            return Err(WorkflowError::ConfirmationRequired { kind, id });
        }
        self.manager::<T>().can_delete(entity).map_err(|e| {
            tracing::warn!(%kind, %id, "delete rejected: entity is active");
            e
        })?;

        self.backend.delete(kind, id).await?;
        tracing::info!(%kind, %id, "entity deleted");
        Ok(())
    }

    /// Whether content fields of `entity` may be edited.
    pub fn can_edit<T: LifecycleEntity>(&self, entity: &T) -> bool {
        self.manager::<T>().can_edit(entity)
    }

    /// Edit a voucher. Only valid on a voucher workflow.
    ///
    /// Content fields (code and discount terms) need an inactive voucher;
    /// discount terms are additionally frozen once the voucher has been
    /// used. Usage limit, expiry and the public flag may change at any time;
    /// a new expiry must be in the future. Visibility changes go through
    /// [`activate`](Self::activate) and [`deactivate`](Self::deactivate).
    pub async fn update_voucher(
        &self,
        voucher: &Voucher,
        changes: &VoucherChanges,
    ) -> Result<(), WorkflowError> {
        if self.policy.kind != EntityKind::Voucher {
            return Err(WorkflowError::KindMismatch {
                kind: self.policy.kind,
                requested: EntityKind::Voucher,
            });
        }
        let manager = self.manager::<Voucher>();
        let touches_content = changes
            .changed_fields(voucher)
            .iter()
            .any(|f| !f.is_operational());
        if touches_content {
            manager.require_editable(voucher)?;
        }
        manager.check_update(voucher, changes).map_err(|e| {
            tracing::warn!(id = %voucher.id, code = e.code(), "voucher edit rejected");
            e
        })?;

        self.backend.update_voucher(voucher.id, changes).await?;
        tracing::info!(id = %voucher.id, "voucher updated");
        Ok(())
    }
}
