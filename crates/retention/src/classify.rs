//! Retention classifier
//!
//! A snapshot is eligible for cleanup when strictly more than the policy's
//! threshold has elapsed since it ended. A snapshot exactly at the threshold
//! is kept.

use chrono::{DateTime, Duration, Utc};
use sweep_core::{ClassificationError, RetentionPolicy, Snapshot};

/// Verdict for a single snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub snapshot: Snapshot,
    /// Parsed end timestamp
    pub ended_at: DateTime<Utc>,
    /// Time elapsed since `ended_at`
    pub age: Duration,
    /// Whether the snapshot falls outside the retention window
    pub eligible: bool,
}

/// Partitions a catalog into keep and to-clean sets
#[derive(Debug, Clone, Copy)]
pub struct RetentionClassifier {
    threshold: Duration,
}

impl RetentionClassifier {
    /// Create a classifier for the given policy
    pub fn new(policy: &RetentionPolicy) -> Self {
        Self {
            threshold: policy.threshold(),
        }
    }

    /// Age a snapshot must exceed to be eligible
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Evaluate one snapshot against `now`
    pub fn evaluate_one(
        &self,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
    ) -> Result<Evaluation, ClassificationError> {
        let ended_at = snapshot.end_time()?;
        let age = now.signed_duration_since(ended_at);
        let eligible = age > self.threshold;

        tracing::debug!(
            snapshot = %snapshot.id,
            age_secs = age.num_seconds(),
            eligible,
            "Classified snapshot"
        );

        Ok(Evaluation {
            snapshot: snapshot.clone(),
            ended_at,
            age,
            eligible,
        })
    }

    /// Evaluate the whole catalog, in catalog order
    ///
    /// Fails on the first snapshot whose end timestamp cannot be parsed.
    pub fn evaluate(
        &self,
        catalog: &[Snapshot],
        now: DateTime<Utc>,
    ) -> Result<Vec<Evaluation>, ClassificationError> {
        catalog
            .iter()
            .map(|snapshot| self.evaluate_one(snapshot, now))
            .collect()
    }

    /// Snapshots eligible for cleanup, in catalog order
    pub fn to_clean(
        &self,
        catalog: &[Snapshot],
        now: DateTime<Utc>,
    ) -> Result<Vec<Snapshot>, ClassificationError> {
        let mut eligible = Vec::new();
        for snapshot in catalog {
            if self.evaluate_one(snapshot, now)?.eligible {
                eligible.push(snapshot.clone());
            }
        }
        Ok(eligible)
    }
}
