//! Full cleanup against a live endpoint

use crate::common::{FakeCluster, SnapshotFixture};
use anyhow::Result;

#[tokio::test]
async fn test_deletes_old_snapshots_above_floor() -> Result<()> {
    // 10 snapshots, 3 older than 7 days, keep at least 5
    let cluster = FakeCluster::start("default", SnapshotFixture::catalog(7, 3, 7)).await;

    let mut cmd = crate::sweep!();
    cmd.env("ES_ENDPOINT", cluster.endpoint())
        .env("ES_KEEP_MIN_SNAPS", "5");
    let result = cmd.run().await?;

    result.assert_success();
    assert!(result.contains_stdout("3 snapshots to clean, remaining : 7"));
    assert_eq!(
        result.progress_lines(),
        vec![
            "Deleting snap old-0 ...",
            "Deleting snap old-1 ...",
            "Deleting snap old-2 ...",
        ]
    );
    assert_eq!(cluster.delete_requests(), vec!["old-0", "old-1", "old-2"]);
    assert_eq!(cluster.remaining_ids().len(), 7);
    Ok(())
}

#[tokio::test]
async fn test_explicit_run_with_flags() -> Result<()> {
    let cluster = FakeCluster::start("nightly", SnapshotFixture::catalog(30, 2, 2)).await;

    let result = crate::sweep!(
        "run",
        "--endpoint",
        cluster.endpoint(),
        "--repo",
        "nightly",
        "--clean-after-days",
        "30"
    )
    .run()
    .await?;

    result.assert_success();
    assert_eq!(cluster.delete_requests(), vec!["old-0", "old-1"]);
    assert_eq!(cluster.remaining_ids(), vec!["fresh-0", "fresh-1"]);
    Ok(())
}

#[tokio::test]
async fn test_nothing_old_enough() -> Result<()> {
    let cluster = FakeCluster::start("default", SnapshotFixture::catalog(7, 0, 4)).await;

    let result = crate::sweep!("--endpoint", cluster.endpoint()).run().await?;

    result.assert_success();
    assert!(result.contains_stdout("0 snapshots to clean, remaining : 4"));
    assert!(cluster.delete_requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_second_run_finds_nothing_left() -> Result<()> {
    let cluster = FakeCluster::start("default", SnapshotFixture::catalog(7, 2, 1)).await;

    crate::sweep!("--endpoint", cluster.endpoint())
        .run()
        .await?
        .assert_success();
    let second = crate::sweep!("--endpoint", cluster.endpoint()).run().await?;

    second.assert_success();
    assert!(second.contains_stdout("0 snapshots to clean, remaining : 1"));
    assert_eq!(cluster.delete_requests(), vec!["old-0", "old-1"]);
    assert_eq!(cluster.list_requests(), 2);
    Ok(())
}

#[tokio::test]
async fn test_verbose_logs_go_to_stderr() -> Result<()> {
    let cluster = FakeCluster::start("default", SnapshotFixture::catalog(7, 1, 1)).await;

    let quiet = crate::sweep!("plan", "--endpoint", cluster.endpoint()).run().await?;
    quiet.assert_success();
    assert!(!quiet.contains_stderr("Fetched snapshot catalog"));

    let verbose = crate::sweep!("--dry-run", "-vv", "--endpoint", cluster.endpoint())
        .run()
        .await?;
    verbose.assert_success();
    assert!(verbose.contains_stderr("Starting cleanup"));
    assert!(verbose.contains_stderr("Fetched snapshot catalog"));
    assert!(!verbose.contains_stdout("Starting cleanup"));
    Ok(())
}
