//! # catalog-cli — Operator CLI for Catalog Lifecycles
//!
//! Provides the `catalog` binary. Every command reads the entity's current
//! state from the backend, applies the lifecycle rules locally, and only
//! then writes.
//!
//! ```bash
//! catalog can-edit --kind product --id 9
//! catalog activate --kind announcement --id 5 --priority 3 --end-date 2026-12-01T00:00:00Z
//! catalog deactivate --kind announcement --id 5
//! catalog delete --kind product --id 9 --yes
//! catalog voucher-field --id 2 --field discountValue
//! ```
//!
//! ## Exit codes
//!
//! - `0`: done, or the check passed.
//! - `2`: the lifecycle rules rejected the request; fix input and retry.
//! - `1`: anything else (configuration, transport, backend).

pub mod commands;
pub mod config;

/// Exit code for a completed command or passing check.
pub const EXIT_OK: u8 = 0;
/// Exit code for a request the lifecycle rules rejected.
pub const EXIT_REJECTED: u8 = 2;
