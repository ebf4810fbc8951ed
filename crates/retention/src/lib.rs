//! Retention decisions and cleanup orchestration
//!
//! This crate provides:
//! - The retention classifier (age test against the policy)
//! - The cleanup executor (safety floor, then delete or simulate)
//! - `Sweeper`, which chains fetch, classification and cleanup for one run

pub mod classify;
pub mod cleanup;
pub mod sweeper;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-exports
pub use classify::{Evaluation, RetentionClassifier};
pub use cleanup::{check_floor, CleanupEvent, CleanupExecutor, CleanupReport};
pub use sweeper::{Plan, Sweeper};
