//! In-memory repository for tests
//!
//! Records every delete request and drops successfully deleted snapshots
//! from its catalog, so a second run sees what a real cluster would.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use sweep_core::{DeleteError, FetchError, Snapshot, SnapshotRepository};

/// Recording fake of a snapshot repository
pub struct RecordingRepository {
    name: String,
    snapshots: Mutex<Vec<Snapshot>>,
    list_status: Option<u16>,
    failing_deletes: HashSet<String>,
    delete_calls: Mutex<Vec<String>>,
    list_calls: Mutex<usize>,
}

impl RecordingRepository {
    /// Repository holding the given catalog
    pub fn new(snapshots: Vec<Snapshot>) -> Self {
        Self {
            name: "default".to_string(),
            snapshots: Mutex::new(snapshots),
            list_status: None,
            failing_deletes: HashSet::new(),
            delete_calls: Mutex::new(Vec::new()),
            list_calls: Mutex::new(0),
        }
    }

    /// Make the list call answer with a non-200 status
    pub fn failing_list(mut self, status: u16) -> Self {
        self.list_status = Some(status);
        self
    }

    /// Make deletion of `id` answer 500
    pub fn failing_delete(mut self, id: &str) -> Self {
        self.failing_deletes.insert(id.to_string());
        self
    }

    /// Ids passed to `delete_snapshot`, in call order, failures included
    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().clone()
    }

    /// Number of list requests served
    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock()
    }

    /// Ids still present in the catalog
    pub fn remaining_ids(&self) -> Vec<String> {
        self.snapshots.lock().iter().map(|s| s.id.clone()).collect()
    }
}

#[async_trait]
impl SnapshotRepository for RecordingRepository {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_snapshots(&self) -> Result<Vec<Snapshot>, FetchError> {
        *self.list_calls.lock() += 1;
        if let Some(status) = self.list_status {
            return Err(FetchError::Status {
                status,
                body: String::new(),
            });
        }
        Ok(self.snapshots.lock().clone())
    }

    async fn delete_snapshot(&self, id: &str) -> Result<(), DeleteError> {
        self.delete_calls.lock().push(id.to_string());
        if self.failing_deletes.contains(id) {
            return Err(DeleteError::Status {
                id: id.to_string(),
                status: "500 Internal Server Error".to_string(),
            });
        }
        self.snapshots.lock().retain(|s| s.id != id);
        Ok(())
    }
}

/// Snapshot that ended at `end`
pub fn snapshot_ended_at(id: &str, end: DateTime<Utc>) -> Snapshot {
    let start = end - Duration::minutes(1);
    Snapshot {
        id: id.to_string(),
        start_epoch: start.timestamp().to_string(),
        end_epoch: end.timestamp().to_string(),
        status: "SUCCESS".to_string(),
        successful_shards: "5".to_string(),
        failed_shards: "0".to_string(),
    }
}

/// Snapshot that ended `age` before `now`
pub fn snapshot_aged(id: &str, now: DateTime<Utc>, age: Duration) -> Snapshot {
    snapshot_ended_at(id, now - age)
}

/// Catalog of `old` snapshots past `days` followed by `fresh` recent ones
pub fn catalog(now: DateTime<Utc>, days: i64, old: usize, fresh: usize) -> Vec<Snapshot> {
    let mut snapshots = Vec::with_capacity(old + fresh);
    for i in 0..old {
        snapshots.push(snapshot_aged(
            &format!("old-{i}"),
            now,
            Duration::days(days + 1 + i as i64),
        ));
    }
    for i in 0..fresh {
        snapshots.push(snapshot_aged(
            &format!("fresh-{i}"),
            now,
            Duration::hours(1 + i as i64),
        ));
    }
    snapshots
}
