//! Validate command - normalize a JSON item backup.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use tracing::info;

use shelflife_core::{export_json, import_json, ItemValidator};

use super::load_config;

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// JSON backup file (array of item records)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file for the canonical backup (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Processing date (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Fail if any entry is rejected
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: ValidateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let json = tokio::fs::read_to_string(&args.input).await?;

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let validator =
        ItemValidator::new(today).with_default_shelf_days(config.interpreter.default_shelf_days);

    let report = import_json(&json, &validator)?;
    info!(
        "{}: {} valid, {} rejected",
        args.input.display(),
        report.items.len(),
        report.rejected.len()
    );

    for (index, reason) in &report.rejected {
        eprintln!("{} Entry {} rejected: {}", style("✗").red(), index, reason);
    }

    if args.strict && !report.rejected.is_empty() {
        anyhow::bail!("{} entries rejected", report.rejected.len());
    }

    let output = export_json(&report.items)?;

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        eprintln!(
            "{} {} items written to {}",
            style("✓").green(),
            report.items.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
