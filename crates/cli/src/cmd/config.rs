//! Configuration command
//!
//! Shows the effective configuration after every layer is applied.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::settings::{self, Resolved};

/// Print the effective configuration
pub fn run_show(resolved: &Resolved) -> Result<()> {
    let config = &resolved.config;

    println!("{}", "Effective Configuration".bold());
    match &resolved.file {
        Some(path) => println!("{}: {}\n", "File".dimmed(), path.display().dimmed()),
        None => println!("{}: {}\n", "File".dimmed(), "(none)".dimmed()),
    }

    println!("{}", "[connection]".yellow());
    println!("  {} = {}", "endpoint".cyan(), config.endpoint);
    println!("  {} = {}", "repository".cyan(), config.repository);

    println!("\n{}", "[retention]".yellow());
    println!(
        "  {} = {} {}",
        "clean_after_days".cyan(),
        config.policy.clean_after_days,
        format!("({}h)", u32::from(config.policy.clean_after_days) * 24).dimmed()
    );
    println!(
        "  {} = {} {}",
        "keep_min_snaps".cyan(),
        config.policy.keep_min_snaps,
        if config.policy.keep_min_snaps == 0 {
            "(safety floor disabled)".dimmed().to_string()
        } else {
            String::new()
        }
    );
    println!("  {} = {}", "dry_run".cyan(), config.policy.dry_run);

    let overridden: Vec<&str> = settings::ENV_VARS
        .iter()
        .copied()
        .filter(|key| std::env::var_os(key).is_some())
        .collect();
    if !overridden.is_empty() {
        println!("\n{} {}", "Environment overrides:".bold(), overridden.join(", "));
    }

    if let Some(path) = settings::default_config_path() {
        if resolved.file.is_none() {
            println!(
                "\n{}",
                format!("Tip: create {} to persist settings", path.display()).dimmed()
            );
        }
    }

    Ok(())
}

/// Print an example config file
pub fn run_example() -> Result<()> {
    print!("{}", settings::example_config());
    Ok(())
}
