//! The seam between the activation workflow and the transport.
//!
//! [`CatalogClient`](crate::CatalogClient) is the HTTP implementation. The
//! workflow only needs these four calls, so tests and alternative transports
//! can stand in for the backend.

use std::future::Future;

use catalog_core::{EntityId, EntityKind};
use catalog_state::{LifecyclePayload, SiblingSnapshot, VoucherChanges};

use crate::error::ClientError;

/// Backend operations the lifecycle workflow depends on.
pub trait CatalogBackend {
    /// All entities of `kind` with `isActive == true`, read live.
    fn list_active(
        &self,
        kind: EntityKind,
    ) -> impl Future<Output = Result<Vec<SiblingSnapshot>, ClientError>> + Send;

    /// Submit a lifecycle transition.
    fn submit_lifecycle(
        &self,
        kind: EntityKind,
        payload: &LifecyclePayload,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Submit an edit to a voucher.
    fn update_voucher(
        &self,
        id: EntityId,
        changes: &VoucherChanges,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Delete an entity.
    fn delete(
        &self,
        kind: EntityKind,
        id: EntityId,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}
