//! # Lifecycle Subcommands
//!
//! Each command fetches the entity, asks the lifecycle rules, and writes
//! only if they pass. Rejections print the reason and return
//! [`EXIT_REJECTED`](crate::EXIT_REJECTED); transport and backend failures
//! propagate as errors.

use anyhow::{Context, Result};
use clap::Subcommand;

use catalog_client::{CatalogClient, Confirmation, LifecycleService, WorkflowError};
use catalog_core::{EntityId, EntityKind, Timestamp};
use catalog_state::{can_mutate_field, LifecycleEntity, VoucherField};

use crate::config::Settings;
use crate::{EXIT_OK, EXIT_REJECTED};

/// Lifecycle subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report whether an entity's content may be edited (it must be inactive).
    CanEdit {
        /// Entity kind: announcement, product, category, voucher.
        #[arg(long)]
        kind: EntityKind,
        /// Entity identifier.
        #[arg(long)]
        id: i64,
    },

    /// Make an entity publicly visible (INACTIVE → ACTIVE).
    Activate {
        /// Entity kind.
        #[arg(long)]
        kind: EntityKind,
        /// Entity identifier.
        #[arg(long)]
        id: i64,
        /// Rank among active entities of the same kind.
        #[arg(long)]
        priority: Option<i32>,
        /// When the entity stops being active (RFC 3339, any offset).
        #[arg(long, value_parser = parse_end_date)]
        end_date: Option<Timestamp>,
    },

    /// Hide an entity and clear its priority and end date (→ INACTIVE).
    Deactivate {
        /// Entity kind.
        #[arg(long)]
        kind: EntityKind,
        /// Entity identifier.
        #[arg(long)]
        id: i64,
    },

    /// Delete an inactive entity.
    Delete {
        /// Entity kind.
        #[arg(long)]
        kind: EntityKind,
        /// Entity identifier.
        #[arg(long)]
        id: i64,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },

    /// Report whether a voucher field may still be changed.
    VoucherField {
        /// Voucher identifier.
        #[arg(long)]
        id: i64,
        /// Field name, e.g. discountValue or expiry_date.
        #[arg(long)]
        field: VoucherField,
    },
}

fn parse_end_date(raw: &str) -> Result<Timestamp, String> {
    Timestamp::parse_lenient(raw).map_err(|e| e.to_string())
}

/// Execute `command` against the backend.
pub async fn run(command: &Command, settings: &Settings, client: CatalogClient) -> Result<u8> {
    match command {
        Command::CanEdit { kind, id } => {
            let record = client.fetch_record(*kind, EntityId(*id)).await?;
            let service = LifecycleService::new(client, settings.policy(*kind));
            if service.can_edit(&record) {
                println!("OK: {kind} {id} is {} and may be edited", record.state());
                Ok(EXIT_OK)
            } else {
                println!("LOCKED: {kind} {id} is active; deactivate it before editing");
                Ok(EXIT_REJECTED)
            }
        }

        Command::Activate {
            kind,
            id,
            priority,
            end_date,
        } => {
            let record = client.fetch_record(*kind, EntityId(*id)).await?;
            let service = LifecycleService::new(client, settings.policy(*kind));
            let outcome = service.activate(&record, *priority, *end_date).await;
            report(outcome.map(|plan| {
                let priority = plan.priority.map_or_else(|| "-".into(), |p| p.to_string());
                let end = plan.end_date.map_or_else(|| "-".into(), |t| t.to_string());
                format!("{kind} {id} activated (priority {priority}, ends {end})")
            }))
        }

        Command::Deactivate { kind, id } => {
            let record = client.fetch_record(*kind, EntityId(*id)).await?;
            let service = LifecycleService::new(client, settings.policy(*kind));
            let outcome = service.deactivate(&record).await;
            report(outcome.map(|_| format!("{kind} {id} deactivated; priority and end date cleared")))
        }

        Command::Delete { kind, id, yes } => {
            let record = client.fetch_record(*kind, EntityId(*id)).await?;
            let service = LifecycleService::new(client, settings.policy(*kind));
            let outcome = service.delete(&record, Confirmation::from(*yes)).await;
            report(outcome.map(|_| format!("{kind} {id} deleted")))
        }

        Command::VoucherField { id, field } => {
            let voucher = client
                .fetch_voucher(EntityId(*id))
                .await
                .with_context(|| format!("fetching voucher {id}"))?;
            if can_mutate_field(&voucher, *field) {
                println!("OK: voucher {id} field {field} may be changed");
                Ok(EXIT_OK)
            } else {
                println!(
                    "LOCKED: voucher {id} field {field} is fixed after {} use(s)",
                    voucher.used_count
                );
                Ok(EXIT_REJECTED)
            }
        }
    }
}

/// Print the outcome of a workflow and map it to an exit code.
fn report(outcome: Result<String, WorkflowError>) -> Result<u8> {
    match outcome {
        Ok(message) => {
            println!("OK: {message}");
            Ok(EXIT_OK)
        }
        Err(e) if e.is_user_correctable() => {
            println!("REJECTED: {e}");
            Ok(EXIT_REJECTED)
        }
        Err(e) => {
            eprintln!("ERROR: {}", e.user_message());
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_client::ClientError;
    use catalog_state::{LockedError, ValidationError};

    #[test]
    fn report_maps_rejections_to_exit_2() {
        let rejected = report(Err(WorkflowError::Validation(ValidationError::ExpiryInPast {
            end_date: Timestamp::parse("2026-01-01T00:00:00Z").unwrap(),
            now: Timestamp::parse("2026-01-02T00:00:00Z").unwrap(),
        })));
        assert_eq!(rejected.unwrap(), EXIT_REJECTED);

        let locked = report(Err(WorkflowError::Locked(LockedError::Active {
            kind: EntityKind::Product,
            id: EntityId(9),
        })));
        assert_eq!(locked.unwrap(), EXIT_REJECTED);
    }

    #[test]
    fn report_propagates_backend_errors() {
        let err = report(Err(WorkflowError::Backend(ClientError::Backend {
            endpoint: "PUT /api/products/9/lifecycle".into(),
            err_code: 5,
            message: Some("Product not found".into()),
        })));
        assert!(err.is_err());
    }

    #[test]
    fn report_success_is_exit_0() {
        assert_eq!(report(Ok("done".into())).unwrap(), EXIT_OK);
    }

    #[test]
    fn end_date_accepts_offsets() {
        let ts = parse_end_date("2026-06-01T07:00:00+07:00").unwrap();
        assert_eq!(ts.to_iso8601(), "2026-06-01T00:00:00Z");
        assert!(parse_end_date("next week").is_err());
    }
}
