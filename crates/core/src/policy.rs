//! Retention policy

use chrono::Duration;

/// Default age threshold in days
pub const DEFAULT_CLEAN_AFTER_DAYS: u16 = 7;

/// Default safety floor (inert unless configured)
pub const DEFAULT_KEEP_MIN_SNAPS: u16 = 0;

/// Rules applied to the snapshot catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// A snapshot is eligible once it ended more than this many days ago
    pub clean_after_days: u16,
    /// Cleanup must never leave fewer snapshots than this
    pub keep_min_snaps: u16,
    /// Report eligible snapshots without deleting them
    pub dry_run: bool,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            clean_after_days: DEFAULT_CLEAN_AFTER_DAYS,
            keep_min_snaps: DEFAULT_KEEP_MIN_SNAPS,
            dry_run: false,
        }
    }
}

impl RetentionPolicy {
    /// Age a snapshot must strictly exceed to become eligible
    pub fn threshold(&self) -> Duration {
        Duration::days(i64::from(self.clean_after_days))
    }
}
