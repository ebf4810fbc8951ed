//! Cleanup executor
//!
//! Enforces the safety floor, then deletes (or simulates deleting) each
//! eligible snapshot in catalog order. The first failed delete stops the
//! run; snapshots deleted before it stay deleted.

use sweep_core::{RetentionPolicy, SafetyFloorError, Snapshot, SnapshotRepository, SweepError};

/// Progress notifications emitted while cleaning up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupEvent {
    /// Batch size and what would be left, emitted before the floor check
    Planned { to_clean: usize, remaining: usize },
    /// Dry-run stand-in for a deletion
    Simulated { id: String },
    /// A delete request is about to be sent
    Deleting { id: String },
    /// The repository confirmed a deletion
    Deleted { id: String },
}

/// Outcome of a completed cleanup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Snapshots in the catalog when the run started
    pub catalog_size: usize,
    /// Ids selected for cleanup
    pub eligible: Vec<String>,
    /// Snapshots left once the batch is gone
    pub remaining: usize,
    /// Ids actually deleted
    pub deleted: Vec<String>,
    /// Ids that would have been deleted in dry-run mode
    pub simulated: Vec<String>,
    pub dry_run: bool,
}

/// Snapshots left after removing `to_clean` from a catalog of `catalog_size`
///
/// Fails when that count is below `keep_min`.
pub fn check_floor(
    catalog_size: usize,
    to_clean: usize,
    keep_min: usize,
) -> Result<usize, SafetyFloorError> {
    let remaining = catalog_size.saturating_sub(to_clean);
    if remaining < keep_min {
        return Err(SafetyFloorError {
            to_clean,
            remaining,
            keep_min,
        });
    }
    Ok(remaining)
}

/// Applies a policy's floor and dry-run settings to an eligible batch
#[derive(Debug, Clone, Copy)]
pub struct CleanupExecutor {
    policy: RetentionPolicy,
}

impl CleanupExecutor {
    /// Create an executor for the given policy
    pub fn new(policy: RetentionPolicy) -> Self {
        Self { policy }
    }

    /// Run the cleanup
    ///
    /// `to_clean` must be drawn from `catalog`. Either no delete request is
    /// issued (floor violated) or the batch is attempted in order until the
    /// first failure.
    pub async fn execute<R, F>(
        &self,
        repository: &R,
        catalog: &[Snapshot],
        to_clean: &[Snapshot],
        mut observer: F,
    ) -> Result<CleanupReport, SweepError>
    where
        R: SnapshotRepository + ?Sized,
        F: FnMut(&CleanupEvent),
    {
        let planned_remaining = catalog.len().saturating_sub(to_clean.len());
        observer(&CleanupEvent::Planned {
            to_clean: to_clean.len(),
            remaining: planned_remaining,
        });

        let remaining = check_floor(
            catalog.len(),
            to_clean.len(),
            usize::from(self.policy.keep_min_snaps),
        )
        .inspect_err(|err| {
            tracing::warn!(
                repository = repository.name(),
                to_clean = err.to_clean,
                remaining = err.remaining,
                keep_min = err.keep_min,
                "Refusing cleanup below safety floor"
            );
        })?;

        let mut report = CleanupReport {
            catalog_size: catalog.len(),
            eligible: to_clean.iter().map(|s| s.id.clone()).collect(),
            remaining,
            dry_run: self.policy.dry_run,
            ..Default::default()
        };

        for snapshot in to_clean {
            let id = snapshot.id.clone();

            if self.policy.dry_run {
                tracing::info!(snapshot = %id, "Dry-run, skipping delete");
                observer(&CleanupEvent::Simulated { id: id.clone() });
                report.simulated.push(id);
                continue;
            }

            observer(&CleanupEvent::Deleting { id: id.clone() });
            repository.delete_snapshot(&id).await?;
            tracing::info!(repository = repository.name(), snapshot = %id, "Deleted snapshot");
            observer(&CleanupEvent::Deleted { id: id.clone() });
            report.deleted.push(id);
        }

        Ok(report)
    }
}
