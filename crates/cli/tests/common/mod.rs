//! Common utilities for integration tests

#![allow(dead_code)]

pub mod cluster;

// Re-export commonly used items
pub use cluster::{FakeCluster, SnapshotFixture};
