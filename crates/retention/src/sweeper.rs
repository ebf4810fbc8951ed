//! One retention run: fetch the catalog, classify it, clean up
//!
//! Each stage returns a `Result`, and a failed stage ends the run before the
//! next one starts.

use chrono::{DateTime, Utc};
use sweep_core::{
    FetchError, RetentionPolicy, SafetyFloorError, Snapshot, SnapshotRepository, SweepError,
};

use crate::classify::{Evaluation, RetentionClassifier};
use crate::cleanup::{check_floor, CleanupEvent, CleanupExecutor, CleanupReport};

/// Read-only view of what a run would do
#[derive(Debug, Clone)]
pub struct Plan {
    /// Every snapshot with its verdict, in catalog order
    pub evaluations: Vec<Evaluation>,
    /// Snapshots left once the eligible ones are gone
    pub remaining: usize,
    /// Set when the batch would break the safety floor
    pub floor_violation: Option<SafetyFloorError>,
}

impl Plan {
    /// Snapshots a run would clean up
    pub fn to_clean(&self) -> impl Iterator<Item = &Snapshot> {
        self.evaluations
            .iter()
            .filter(|e| e.eligible)
            .map(|e| &e.snapshot)
    }

    pub fn catalog_size(&self) -> usize {
        self.evaluations.len()
    }
}

/// Retention enforcer bound to one repository
pub struct Sweeper<R> {
    repository: R,
    policy: RetentionPolicy,
}

impl<R: SnapshotRepository> Sweeper<R> {
    /// Create a sweeper for `repository` under `policy`
    pub fn new(repository: R, policy: RetentionPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// Retrieve the full catalog
    pub async fn fetch(&self) -> Result<Vec<Snapshot>, FetchError> {
        let catalog = self.repository.list_snapshots().await?;
        tracing::debug!(
            repository = self.repository.name(),
            count = catalog.len(),
            "Fetched snapshot catalog"
        );
        Ok(catalog)
    }

    /// Classify the current catalog without touching it
    pub async fn plan(&self) -> Result<Plan, SweepError> {
        self.plan_at(Utc::now()).await
    }

    /// `plan` with an explicit clock
    pub async fn plan_at(&self, now: DateTime<Utc>) -> Result<Plan, SweepError> {
        let catalog = self.fetch().await?;
        let evaluations = RetentionClassifier::new(&self.policy).evaluate(&catalog, now)?;

        let eligible = evaluations.iter().filter(|e| e.eligible).count();
        let (remaining, floor_violation) = match check_floor(
            catalog.len(),
            eligible,
            usize::from(self.policy.keep_min_snaps),
        ) {
            Ok(remaining) => (remaining, None),
            Err(err) => (err.remaining, Some(err)),
        };

        Ok(Plan {
            evaluations,
            remaining,
            floor_violation,
        })
    }

    /// Fetch, classify and clean up
    pub async fn run<F>(&self, observer: F) -> Result<CleanupReport, SweepError>
    where
        F: FnMut(&CleanupEvent),
    {
        self.run_at(Utc::now(), observer).await
    }

    /// `run` with an explicit clock
    pub async fn run_at<F>(&self, now: DateTime<Utc>, observer: F) -> Result<CleanupReport, SweepError>
    where
        F: FnMut(&CleanupEvent),
    {
        let catalog = self.fetch().await?;
        let to_clean = RetentionClassifier::new(&self.policy).to_clean(&catalog, now)?;

        tracing::info!(
            repository = self.repository.name(),
            catalog = catalog.len(),
            to_clean = to_clean.len(),
            dry_run = self.policy.dry_run,
            "Starting cleanup"
        );

        CleanupExecutor::new(self.policy)
            .execute(&self.repository, &catalog, &to_clean, observer)
            .await
    }
}
