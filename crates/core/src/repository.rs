//! Transport seam between the retention logic and the cluster

use async_trait::async_trait;

use crate::error::{DeleteError, FetchError};
use crate::snapshot::Snapshot;

/// A named snapshot repository on a remote cluster
///
/// Implementations are bound to one endpoint and one repository name.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Name of the repository, for diagnostics
    fn name(&self) -> &str;

    /// Every snapshot the repository reports, in the order it reports them
    async fn list_snapshots(&self) -> Result<Vec<Snapshot>, FetchError>;

    /// Ask the repository to destroy one snapshot
    async fn delete_snapshot(&self, id: &str) -> Result<(), DeleteError>;
}

#[async_trait]
impl<T: SnapshotRepository + ?Sized> SnapshotRepository for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn list_snapshots(&self) -> Result<Vec<Snapshot>, FetchError> {
        (**self).list_snapshots().await
    }

    async fn delete_snapshot(&self, id: &str) -> Result<(), DeleteError> {
        (**self).delete_snapshot(id).await
    }
}
