//! # snapsweep
//!
//! Retention policy enforcer for cluster snapshot repositories.
//!
//! ## Commands
//!
//! - `snapsweep run` - Delete snapshots past the retention window (default)
//! - `snapsweep plan` - Show each snapshot's verdict without deleting
//! - `snapsweep config` - Show the effective configuration
//!
//! ## Configuration
//!
//! Defaults, then `config.toml`, then environment, then flags:
//!
//! - `ES_ENDPOINT` - Cluster endpoint (default: `es6:9200`)
//! - `ES_REPO` - Snapshot repository (default: `default`)
//! - `ES_CLEAN_AFTER_DAYS` - Retention window in days (default: `7`)
//! - `ES_KEEP_MIN_SNAPS` - Minimum snapshots left after cleanup (default: `0`)
//! - `ES_DRY_RUN` - Simulate deletions when set, whatever its value

pub mod cmd;
pub mod settings;
pub mod util;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sweep_core::SweepError;

/// Snapsweep - Age-based cleanup for snapshot repositories
#[derive(Debug, Parser)]
#[command(name = "snapsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: ConfigArgs,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (default: run)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration overrides shared by every command
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Configuration file (default: <config dir>/snapsweep/config.toml)
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    /// Cluster endpoint, host:port or http(s) URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Snapshot repository name
    #[arg(long = "repo", value_name = "NAME", global = true)]
    pub repository: Option<String>,

    /// Age in days after which a snapshot is eligible for cleanup
    #[arg(long, value_name = "DAYS", global = true)]
    pub clean_after_days: Option<u16>,

    /// Minimum number of snapshots that must remain after cleanup
    #[arg(long, value_name = "COUNT", global = true)]
    pub keep_min_snaps: Option<u16>,

    /// Report eligible snapshots without deleting them
    #[arg(long, global = true)]
    pub dry_run: bool,
}

/// CLI subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Delete snapshots older than the retention window
    Run,
    /// Show every snapshot's verdict without deleting anything
    Plan,
    /// Show the effective configuration
    Config {
        /// Print an example config file instead
        #[arg(long)]
        example: bool,
    },
}

/// Resolve configuration and run the selected command
///
/// Configuration failures surface as `SweepError::Config` so they are
/// reported against the environment stage.
pub fn execute(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Run);

    if let Commands::Config { example: true } = command {
        return cmd::config::run_example();
    }

    let resolved = settings::load(&cli.settings).map_err(SweepError::from)?;
    tracing::debug!(config = ?resolved.config, file = ?resolved.file, "Resolved configuration");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match command {
            Commands::Run => cmd::run::run(&resolved).await,
            Commands::Plan => cmd::plan::run(&resolved).await,
            Commands::Config { .. } => cmd::config::run_show(&resolved),
        }
    })
}

/// Operator-facing line for a failed run
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<SweepError>() {
        Some(sweep) => format!("Error during {} : {err:#}", sweep.stage()),
        None => format!("Error: {err:#}"),
    }
}
