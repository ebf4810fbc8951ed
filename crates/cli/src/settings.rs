//! Configuration resolution
//!
//! Layers, lowest precedence first: built-in defaults, the TOML config
//! file, `ES_*` environment variables, command-line flags.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sweep_core::{Config, ConfigError};

use crate::ConfigArgs;

pub const ENV_ENDPOINT: &str = "ES_ENDPOINT";
pub const ENV_REPO: &str = "ES_REPO";
pub const ENV_CLEAN_AFTER_DAYS: &str = "ES_CLEAN_AFTER_DAYS";
pub const ENV_KEEP_MIN_SNAPS: &str = "ES_KEEP_MIN_SNAPS";
/// Presence enables dry-run, the value is ignored
pub const ENV_DRY_RUN: &str = "ES_DRY_RUN";

/// All environment variables read during resolution
pub const ENV_VARS: [&str; 5] = [
    ENV_ENDPOINT,
    ENV_REPO,
    ENV_CLEAN_AFTER_DAYS,
    ENV_KEEP_MIN_SNAPS,
    ENV_DRY_RUN,
];

/// Contents of `config.toml`, every key optional
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub repository: Option<String>,
    pub clean_after_days: Option<u16>,
    pub keep_min_snaps: Option<u16>,
    pub dry_run: Option<bool>,
}

/// Effective configuration plus where the file layer came from
#[derive(Debug, Clone)]
pub struct Resolved {
    pub config: Config,
    pub file: Option<PathBuf>,
}

/// Default config file location (`<config dir>/snapsweep/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("snapsweep").join("config.toml"))
}

/// Read and parse a config file
pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&text).map_err(|e| ConfigError::ParseFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Resolve the configuration from the process environment
///
/// An explicit `--config` file must exist; the default location is only
/// used when present.
pub fn load(args: &ConfigArgs) -> Result<Resolved, ConfigError> {
    let path = match &args.config_file {
        Some(path) => Some(path.clone()),
        None => default_config_path().filter(|path| path.is_file()),
    };

    let file = path.as_deref().map(load_file).transpose()?;
    let config = resolve(
        file.as_ref(),
        |key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()),
        args,
    )?;

    Ok(Resolved { config, file: path })
}

/// Merge all layers into a `Config`
///
/// `lookup` stands in for the environment.
pub fn resolve<F>(
    file: Option<&FileConfig>,
    lookup: F,
    args: &ConfigArgs,
) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::default();

    if let Some(file) = file {
        if let Some(endpoint) = &file.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(repository) = &file.repository {
            config.repository = repository.clone();
        }
        if let Some(days) = file.clean_after_days {
            config.policy.clean_after_days = days;
        }
        if let Some(keep) = file.keep_min_snaps {
            config.policy.keep_min_snaps = keep;
        }
        if let Some(dry_run) = file.dry_run {
            config.policy.dry_run = dry_run;
        }
    }

    if let Some(endpoint) = lookup(ENV_ENDPOINT) {
        config.endpoint = endpoint;
    }
    if let Some(repository) = lookup(ENV_REPO) {
        config.repository = repository;
    }
    if let Some(days) = parse_number(&lookup, ENV_CLEAN_AFTER_DAYS)? {
        config.policy.clean_after_days = days;
    }
    if let Some(keep) = parse_number(&lookup, ENV_KEEP_MIN_SNAPS)? {
        config.policy.keep_min_snaps = keep;
    }
    if lookup(ENV_DRY_RUN).is_some() {
        config.policy.dry_run = true;
    }

    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(repository) = &args.repository {
        config.repository = repository.clone();
    }
    if let Some(days) = args.clean_after_days {
        config.policy.clean_after_days = days;
    }
    if let Some(keep) = args.keep_min_snaps {
        config.policy.keep_min_snaps = keep;
    }
    if args.dry_run {
        config.policy.dry_run = true;
    }

    if config.endpoint.is_empty() {
        return Err(ConfigError::Empty {
            key: "endpoint".to_string(),
        });
    }
    if config.repository.is_empty() {
        return Err(ConfigError::Empty {
            key: "repository".to_string(),
        });
    }

    Ok(config)
}

fn parse_number<F>(lookup: &F, key: &str) -> Result<Option<u16>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidNumber {
                    key: key.to_string(),
                    value,
                    source,
                })
        })
        .transpose()
}

/// Example `config.toml` with every key at its default
pub fn example_config() -> &'static str {
    r#"# snapsweep configuration
# Environment variables (ES_ENDPOINT, ES_REPO, ES_CLEAN_AFTER_DAYS,
# ES_KEEP_MIN_SNAPS, ES_DRY_RUN) and command-line flags override these.

# host:port of the cluster, or a full http(s):// URL
endpoint = "es6:9200"

# Snapshot repository to clean
repository = "default"

# Snapshots that ended more than this many days ago are eligible
clean_after_days = 7

# Never leave fewer snapshots than this (0 disables the check)
keep_min_snaps = 0

# Report instead of deleting
dry_run = false
"#
}
