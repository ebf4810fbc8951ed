//! Snapsweep core - shared model for the snapshot retention enforcer
//!
//! This crate provides:
//! - The `Snapshot` record as reported by the cluster
//! - Retention policy and run configuration
//! - The per-stage error taxonomy
//! - The `SnapshotRepository` transport seam

pub mod config;
pub mod error;
pub mod policy;
pub mod repository;
pub mod snapshot;

// Re-export main types for convenience
pub use config::Config;
pub use error::{
    BoxError, ClassificationError, ConfigError, DeleteError, FetchError, SafetyFloorError, Stage,
    SweepError,
};
pub use policy::RetentionPolicy;
pub use repository::SnapshotRepository;
pub use snapshot::Snapshot;

/// Common result type used throughout the sweep crates
pub type Result<T> = std::result::Result<T, SweepError>;
