//! Delete snapshots past the retention window

use anyhow::Result;
use elastic::ElasticClient;
use owo_colors::OwoColorize;
use retention::{CleanupEvent, CleanupReport, Sweeper};
use sweep_core::{RetentionPolicy, SnapshotRepository, SweepError};

use crate::settings::Resolved;
use crate::util;

pub async fn run(resolved: &Resolved) -> Result<()> {
    let config = &resolved.config;
    if config.policy.dry_run {
        println!("Enabling dry-run mode");
    }

    let client = ElasticClient::from_config(config).map_err(SweepError::from)?;
    let report = execute(client, config.policy).await?;

    print_summary(&report);
    Ok(())
}

/// Run the full pipeline against `repository`, printing progress
pub async fn execute<R: SnapshotRepository>(
    repository: R,
    policy: RetentionPolicy,
) -> Result<CleanupReport, SweepError> {
    Sweeper::new(repository, policy).run(print_event).await
}

/// Print the progress line for an event
pub fn print_event(event: &CleanupEvent) {
    if let Some(line) = event_line(event) {
        println!("{}", line);
    }
}

/// Progress line for an event, if it has one
pub fn event_line(event: &CleanupEvent) -> Option<String> {
    match event {
        CleanupEvent::Planned { to_clean, remaining } => Some(format!(
            "{} snapshots to clean, remaining : {}",
            to_clean, remaining
        )),
        CleanupEvent::Simulated { id } => {
            Some(format!("[DRY-RUN] Snap {} would have been deleted", id))
        }
        CleanupEvent::Deleting { id } => Some(format!("Deleting snap {} ...", id)),
        CleanupEvent::Deleted { .. } => None,
    }
}

fn print_summary(report: &CleanupReport) {
    println!();

    if report.eligible.is_empty() {
        println!("{}", "Nothing to clean - every snapshot is within retention".dimmed());
        return;
    }

    if report.dry_run {
        println!(
            "{} {} would have been deleted, {} remaining",
            "Dry run complete:".yellow().bold(),
            util::snapshots(report.simulated.len()),
            report.remaining
        );
    } else {
        println!(
            "{} Deleted {}, {} remaining",
            "✓".green(),
            util::snapshots(report.deleted.len()),
            report.remaining
        );
    }
}
