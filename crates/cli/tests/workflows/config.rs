//! Configuration errors and the config command

use anyhow::Result;

#[tokio::test]
async fn test_invalid_number_fails_before_network() -> Result<()> {
    let mut cmd = crate::sweep!();
    // Nothing listens here; a network call would fail with a different stage
    cmd.env("ES_ENDPOINT", "127.0.0.1:9")
        .env("ES_CLEAN_AFTER_DAYS", "a week");
    let result = cmd.run().await?;

    result.assert_failure();
    assert_eq!(result.exit_code, 1);
    assert!(result.contains_stderr(
        "Error during environment initialization : invalid value \"a week\" for ES_CLEAN_AFTER_DAYS"
    ));
    Ok(())
}

#[tokio::test]
async fn test_invalid_keep_min_snaps() -> Result<()> {
    let mut cmd = crate::sweep!();
    cmd.env("ES_KEEP_MIN_SNAPS", "-2");
    let result = cmd.run().await?;

    result.assert_failure();
    assert!(result.contains_stderr("ES_KEEP_MIN_SNAPS"));
    Ok(())
}

#[tokio::test]
async fn test_config_shows_defaults() -> Result<()> {
    let result = crate::sweep!("config").run().await?;

    result.assert_success();
    assert!(result.contains_stdout("es6:9200"));
    assert!(result.contains_stdout("repository"));
    assert!(result.contains_stdout("clean_after_days"));
    assert!(result.contains_stdout("(none)"));
    Ok(())
}

// The default config directory is only driven by XDG_CONFIG_HOME on Linux
#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_config_file_then_env_then_flags() -> Result<()> {
    let mut cmd = crate::sweep!("config", "--keep-min-snaps", "4");
    let config_dir = cmd.home().join(".config").join("snapsweep");
    std::fs::create_dir_all(&config_dir)?;
    std::fs::write(
        config_dir.join("config.toml"),
        "endpoint = \"file-host:9200\"\nrepository = \"from-file\"\nkeep_min_snaps = 2\n",
    )?;
    cmd.env("ES_REPO", "from-env");
    let result = cmd.run().await?;

    result.assert_success();
    assert!(result.contains_stdout("file-host:9200"));
    assert!(result.contains_stdout("from-env"));
    assert!(!result.contains_stdout("from-file"));
    assert!(result.contains_stdout("keep_min_snaps") && result.contains_stdout("= 4"));
    assert!(result.contains_stdout("config.toml"));
    Ok(())
}

#[tokio::test]
async fn test_missing_explicit_config_file() -> Result<()> {
    let result = crate::sweep!("config", "--config", "/nonexistent/snapsweep.toml")
        .run()
        .await?;

    result.assert_failure();
    assert!(result.contains_stderr(
        "Error during environment initialization : failed to read config file /nonexistent/snapsweep.toml"
    ));
    Ok(())
}

#[tokio::test]
async fn test_config_example() -> Result<()> {
    let result = crate::sweep!("config", "--example").run().await?;

    result.assert_success();
    assert!(result.contains_stdout("clean_after_days = 7"));
    assert!(result.contains_stdout("keep_min_snaps = 0"));
    Ok(())
}
