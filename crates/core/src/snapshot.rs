//! Snapshot records as reported by the `_cat/snapshots` API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClassificationError;

/// One point-in-time backup known to the repository
///
/// Every field is string-typed on the wire, including the epoch timestamps.
/// Only `id` is mandatory: a missing `end_epoch` is left empty so it is
/// reported against its snapshot during classification instead of failing
/// the whole fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unique within the repository
    pub id: String,
    /// Start time, epoch seconds
    #[serde(default)]
    pub start_epoch: String,
    /// End time, epoch seconds
    #[serde(default)]
    pub end_epoch: String,
    /// Textual status (`SUCCESS`, `PARTIAL`, ...)
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub successful_shards: String,
    #[serde(default)]
    pub failed_shards: String,
}

impl Snapshot {
    /// Point in time the snapshot finished
    pub fn end_time(&self) -> Result<DateTime<Utc>, ClassificationError> {
        parse_epoch(&self.id, "end_epoch", &self.end_epoch)
    }

    /// Point in time the snapshot started
    pub fn start_time(&self) -> Result<DateTime<Utc>, ClassificationError> {
        parse_epoch(&self.id, "start_epoch", &self.start_epoch)
    }
}

fn parse_epoch(
    id: &str,
    field: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, ClassificationError> {
    let secs: i64 = raw
        .parse()
        .map_err(|source| ClassificationError::InvalidEpoch {
            id: id.to_string(),
            field,
            value: raw.to_string(),
            source,
        })?;

    DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| ClassificationError::OutOfRange {
        id: id.to_string(),
        field,
        value: secs,
    })
}
