//! Run configuration
//!
//! `Config` is built once at startup and handed to the pipeline by reference.
//! How it gets populated (defaults, file, environment, flags) is the binary's
//! concern.

use crate::policy::RetentionPolicy;

/// Default `host:port` of the cluster administrative API
pub const DEFAULT_ENDPOINT: &str = "es6:9200";

/// Default snapshot repository name
pub const DEFAULT_REPOSITORY: &str = "default";

/// Immutable configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cluster endpoint, `host:port` or a full `http(s)://` URL
    pub endpoint: String,
    /// Snapshot repository to operate on
    pub repository: String,
    /// Retention rules
    pub policy: RetentionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
            policy: RetentionPolicy::default(),
        }
    }
}
