//! CLI configuration.
//!
//! Settings come from an optional YAML file and the environment, with the
//! environment winning. The API token is read from `CATALOG_API_TOKEN` only
//! and is never accepted from the file.
//!
//! ```yaml
//! api_url: https://admin.example.com
//! timeout_secs: 10
//! priority_ranges:
//!   announcement: { min: 1, max: 5 }
//!   product: { min: 1, max: 10 }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use catalog_client::config::{parse_timeout, ENV_API_TIMEOUT, ENV_API_URL};
use catalog_client::ClientConfig;
use catalog_core::EntityKind;
use catalog_state::{LifecyclePolicy, PriorityRange};
use serde::Deserialize;

/// Contents of the YAML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Backend base URL.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Per-kind priority range overrides.
    #[serde(default)]
    pub priority_ranges: HashMap<EntityKind, PriorityRange>,
}

impl FileConfig {
    /// Load and parse a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Parse YAML text.
    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        for (kind, range) in &config.priority_ranges {
            anyhow::ensure!(
                range.min <= range.max,
                "priority range for {kind} is empty ({range})"
            );
        }
        Ok(config)
    }
}

/// Resolved settings for one CLI run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where to reach the backend.
    pub client: ClientConfig,
    priority_ranges: HashMap<EntityKind, PriorityRange>,
}

impl Settings {
    /// Merge the file with environment values from `lookup`.
    pub fn resolve<F>(file: FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(ENV_API_URL)
            .or(file.api_url)
            .with_context(|| format!("no backend URL: set {ENV_API_URL} or api_url in the config file"))?;
        let mut client = ClientConfig::parse(&api_url)?;

        if let Some(raw) = lookup(ENV_API_TIMEOUT) {
            client.timeout_secs = parse_timeout(&raw)?;
        } else if let Some(secs) = file.timeout_secs {
            client.timeout_secs = parse_timeout(&secs.to_string())?;
        }

        Ok(Self {
            client,
            priority_ranges: file.priority_ranges,
        })
    }

    /// The lifecycle policy for `kind`, with any configured range applied.
    pub fn policy(&self, kind: EntityKind) -> LifecyclePolicy {
        let policy = LifecyclePolicy::for_kind(kind);
        match self.priority_ranges.get(&kind) {
            Some(range) => policy.with_priority_range(Some(*range)),
            None => policy,
        }
    }
}
