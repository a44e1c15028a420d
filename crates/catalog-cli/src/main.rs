//! # catalog CLI entry point
//!
//! Parses arguments, resolves configuration and credentials, and dispatches
//! to the lifecycle commands.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog_cli::commands::{run, Command};
use catalog_cli::config::{FileConfig, Settings};
use catalog_client::{CatalogClient, Credentials};

/// Catalog console lifecycle tool.
///
/// Checks and applies activation, deactivation, and deletion of
/// announcements, products, categories, and vouchers against the catalog
/// backend.
#[derive(Parser, Debug)]
#[command(name = "catalog", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match execute(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn execute(cli: Cli) -> Result<u8> {
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(file, |key| std::env::var(key).ok())?;
    tracing::debug!(base_url = %settings.client.base_url, "resolved backend");

    let credentials = Credentials::from_env()?;
    let client = CatalogClient::new(settings.client.clone(), &credentials)?;
    run(&cli.command, &settings, client).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::EntityKind;
    use catalog_state::VoucherField;

    #[test]
    fn parse_activate_with_end_date() {
        let cli = Cli::try_parse_from([
            "catalog",
            "activate",
            "--kind",
            "announcement",
            "--id",
            "5",
            "--priority",
            "3",
            "--end-date",
            "2026-12-01T00:00:00Z",
        ])
        .unwrap();
        match cli.command {
            Command::Activate {
                kind,
                id,
                priority,
                end_date,
            } => {
                assert_eq!(kind, EntityKind::Announcement);
                assert_eq!(id, 5);
                assert_eq!(priority, Some(3));
                assert_eq!(end_date.unwrap().to_iso8601(), "2026-12-01T00:00:00Z");
            }
            other => panic!("expected Activate, got {other:?}"),
        }
    }

    #[test]
    fn parse_delete_defaults_to_unconfirmed() {
        let cli = Cli::try_parse_from(["catalog", "delete", "--kind", "product", "--id", "9"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { yes: false, .. }));
    }

    #[test]
    fn parse_voucher_field() {
        let cli = Cli::try_parse_from([
            "catalog",
            "-vv",
            "voucher-field",
            "--id",
            "2",
            "--field",
            "discountValue",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::VoucherField {
                field: VoucherField::DiscountValue,
                ..
            }
        ));
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["catalog", "can-edit", "--kind", "coupon", "--id", "1"]).is_err());
    }
}
