//! Show what a run would do, without deleting anything

use anyhow::Result;
use elastic::ElasticClient;
use owo_colors::OwoColorize;
use retention::{Plan, Sweeper};
use sweep_core::{Config, SweepError};

use crate::settings::Resolved;
use crate::util;

pub async fn run(resolved: &Resolved) -> Result<()> {
    let config = &resolved.config;

    let client = ElasticClient::from_config(config).map_err(SweepError::from)?;
    let location = format!("{} @ {}", config.repository, client.base_url());
    let plan = Sweeper::new(client, config.policy).plan().await?;

    println!("{}", "Retention Plan".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("Repository:    {}", location.cyan());
    println!(
        "Policy:        clean after {} days, keep at least {}",
        config.policy.clean_after_days, config.policy.keep_min_snaps
    );
    println!();

    if plan.catalog_size() == 0 {
        println!("  {}", "No snapshots in repository".dimmed());
        return Ok(());
    }

    for line in table(&plan) {
        println!("{}", line);
    }
    println!();

    print_verdict(&plan, config);
    Ok(())
}

/// Plain-text table rows, header first
pub fn table(plan: &Plan) -> Vec<String> {
    let id_width = plan
        .evaluations
        .iter()
        .map(|e| e.snapshot.id.len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    let mut lines = Vec::with_capacity(plan.evaluations.len() + 1);
    lines.push(format!(
        "  {:<id_width$}  {:<19}  {:<12}  {:<11}  {}",
        "ID", "ENDED (UTC)", "AGE", "STATUS", "VERDICT"
    ));

    for evaluation in &plan.evaluations {
        let verdict = if evaluation.eligible {
            "clean".red().to_string()
        } else {
            "keep".green().to_string()
        };
        lines.push(format!(
            "  {:<id_width$}  {:<19}  {:<12}  {:<11}  {}",
            evaluation.snapshot.id,
            util::format_timestamp(evaluation.ended_at),
            util::format_age(evaluation.age),
            evaluation.snapshot.status,
            verdict
        ));
    }

    lines
}

fn print_verdict(plan: &Plan, config: &Config) {
    let to_clean = plan.to_clean().count();
    println!("{} snapshots to clean, remaining : {}", to_clean, plan.remaining);

    match &plan.floor_violation {
        Some(violation) => {
            println!(
                "{} {}",
                "Cleanup would be refused:".red().bold(),
                violation
            );
        }
        None if to_clean == 0 => {
            println!("{}", "Nothing to clean".dimmed());
        }
        None if config.policy.dry_run => {
            println!(
                "{}",
                "Dry-run is enabled: a run would only report these snapshots".yellow()
            );
        }
        None => {
            println!(
                "{} {} would be deleted",
                "→".cyan(),
                util::snapshots(to_clean)
            );
        }
    }
}
