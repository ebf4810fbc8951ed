//! Error taxonomy
//!
//! Each stage of a run has its own error type. `SweepError` unifies them so
//! the binary can report which stage failed.

use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed transport error, keeps the core free of any HTTP client types
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid configuration, raised before any network call
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting is not a valid integer in range
    #[error("invalid value {value:?} for {key}")]
    InvalidNumber {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A required string setting is empty
    #[error("{key} must not be empty")]
    Empty { key: String },

    /// The endpoint cannot be turned into a base URL
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// A configuration file could not be read
    #[error("failed to read config file {}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for the expected keys
    #[error("failed to parse config file {}: {reason}", path.display())]
    ParseFile { path: PathBuf, reason: String },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client")]
    Client {
        #[source]
        source: BoxError,
    },
}

/// Failure to retrieve the snapshot catalog
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint could not be reached or the body could not be read
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The repository answered with something other than 200
    #[error("query to elasticsearch returned status {status}")]
    Status { status: u16, body: String },

    /// The body is not a list of snapshots
    #[error("failed to decode snapshot list")]
    Decode {
        #[source]
        source: BoxError,
    },
}

/// A snapshot record with a corrupt timestamp
#[derive(Debug, Error)]
pub enum ClassificationError {
    /// The field is not an integer
    #[error("snapshot {id} has invalid {field} {value:?}, expected integer epoch seconds")]
    InvalidEpoch {
        id: String,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The field is an integer but not a representable point in time
    #[error("snapshot {id} has out of range {field} {value}")]
    OutOfRange {
        id: String,
        field: &'static str,
        value: i64,
    },
}

impl ClassificationError {
    /// Id of the offending snapshot
    pub fn snapshot_id(&self) -> &str {
        match self {
            Self::InvalidEpoch { id, .. } | Self::OutOfRange { id, .. } => id,
        }
    }
}

/// Cleanup would drop the catalog below the configured minimum
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "i'm about to remove all snapshots ! Exiting gracefully instead \
     ({to_clean} to clean would leave {remaining}, minimum is {keep_min})"
)]
pub struct SafetyFloorError {
    /// Size of the eligible batch
    pub to_clean: usize,
    /// Snapshots that would be left
    pub remaining: usize,
    /// Configured floor
    pub keep_min: usize,
}

/// A single delete request failed
#[derive(Debug, Error)]
pub enum DeleteError {
    /// The request never got a response
    #[error("failed to delete snapshot {id}")]
    Transport {
        id: String,
        #[source]
        source: BoxError,
    },

    /// The repository answered with something other than 200
    #[error("error during deletion of snapshot {id} with status : {status}")]
    Status { id: String, status: String },
}

impl DeleteError {
    /// Id of the snapshot whose deletion failed
    pub fn snapshot_id(&self) -> &str {
        match self {
            Self::Transport { id, .. } | Self::Status { id, .. } => id,
        }
    }
}

/// Stage of a run, used to prefix operator-facing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Configuration resolution
    Environment,
    /// Catalog fetch
    Retrieval,
    /// Classification
    Listing,
    /// Safety check and deletions
    Cleanup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Environment => "environment initialization",
            Self::Retrieval => "retrieval of snapshots",
            Self::Listing => "listing of snapshots to clean",
            Self::Cleanup => "cleanup of snapshots",
        };
        f.write_str(name)
    }
}

/// Any failure that ends a run
#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Classification(#[from] ClassificationError),

    #[error(transparent)]
    SafetyFloor(#[from] SafetyFloorError),

    #[error(transparent)]
    Delete(#[from] DeleteError),
}

impl SweepError {
    /// Stage that produced the error
    pub fn stage(&self) -> Stage {
        match self {
            Self::Config(_) => Stage::Environment,
            Self::Fetch(_) => Stage::Retrieval,
            Self::Classification(_) => Stage::Listing,
            Self::SafetyFloor(_) | Self::Delete(_) => Stage::Cleanup,
        }
    }
}
