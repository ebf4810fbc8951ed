//! Shared formatting helpers for CLI output

use chrono::{DateTime, Duration, Utc};

/// Format an age as a coarse human-readable span ("3 days")
pub fn format_age(age: Duration) -> String {
    let seconds = age.num_seconds();
    if seconds < 0 {
        return "in the future".to_string();
    }

    if seconds < 60 {
        format!("{} seconds", seconds)
    } else if seconds < 3600 {
        format!("{} minutes", seconds / 60)
    } else if seconds < 86400 {
        format!("{} hours", seconds / 3600)
    } else if seconds < 604800 * 2 {
        format!("{} days", seconds / 86400)
    } else {
        format!("{} weeks", seconds / 604800)
    }
}

/// Format a timestamp as absolute UTC time ("2024-01-03 14:30:00")
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Pluralize "snapshot" for a count
pub fn snapshots(count: usize) -> String {
    if count == 1 {
        "1 snapshot".to_string()
    } else {
        format!("{} snapshots", count)
    }
}
