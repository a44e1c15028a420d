//! # catalog-client — Backend Boundary and Activation Workflow
//!
//! Talks to the catalog backend over HTTP and sequences the lifecycle
//! decisions from `catalog-state` around it:
//!
//! 1. fetch the live active-siblings snapshot (never cached),
//! 2. ask the lifecycle manager for a plan,
//! 3. submit the plan and report the backend's verdict.
//!
//! Nothing is written before step 3, so abandoning a flow needs no
//! compensation. The backend stays authoritative: a conflict it detects
//! after a passing client-side check is surfaced as-is.
//!
//! ## Credentials
//!
//! The bearer token is an explicit [`Credentials`] value handed to
//! [`CatalogClient::new`]. The client never reads it from ambient state
//! at request time.
//!
//! ## Retries
//!
//! None. Validation failures need operator input and transport failures are
//! re-triggered by the operator; timeouts come from the HTTP client.

pub mod backend;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod service;

pub use backend::CatalogBackend;
pub use client::CatalogClient;
pub use config::{ClientConfig, ConfigError, Credentials};
pub use envelope::ApiEnvelope;
pub use error::ClientError;
pub use service::{Confirmation, LifecycleService, WorkflowError};
